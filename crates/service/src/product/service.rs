use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::repository::ProductRepository;
use super::Product;
use crate::errors::ServiceError;

/// Product business operations. Currently a straight pass-through; validation
/// rules belong here once there are any.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create_product(&self, product: Product) -> Result<Product, ServiceError>;
    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError>;
    /// Updating a missing id is a no-op success; the input is echoed back.
    async fn update_product(&self, product: Product) -> Result<Product, ServiceError>;
    /// Deleting a missing id is a no-op success.
    async fn delete_product(&self, id: i32) -> Result<(), ServiceError>;
}

pub struct DefaultProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> DefaultProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: ProductRepository> ProductService for DefaultProductService<R> {
    async fn create_product(&self, product: Product) -> Result<Product, ServiceError> {
        let created = self.repo.create(product).await?;
        info!(id = created.id, name = %created.name, "product_created");
        Ok(created)
    }

    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.get_all().await
    }

    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        self.repo.get_by_id(id).await
    }

    async fn update_product(&self, product: Product) -> Result<Product, ServiceError> {
        let affected = self.repo.update(&product).await?;
        if affected == 0 {
            warn!(id = product.id, "update matched no product");
        }
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            warn!(id, "delete matched no product");
        }
        Ok(())
    }
}
