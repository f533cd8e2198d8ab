use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use models::product;

use super::Product;
use crate::errors::ServiceError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert and return the row with its store-assigned id. Any incoming id is ignored.
    async fn create(&self, product: Product) -> Result<Product, ServiceError>;
    async fn get_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Product, ServiceError>;
    /// Replace every mutable column of `product.id`; returns rows affected (0 is not an error).
    async fn update(&self, product: &Product) -> Result<u64, ServiceError>;
    /// Returns rows affected (0 is not an error).
    async fn delete(&self, id: i32) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
/// The connection is shared with the other repositories of the process.
pub struct SeaOrmProductRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeaOrmProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ServiceError> {
        product.to_active_fields().insert(self.db.as_ref()).await.map_err(ServiceError::db)
    }

    async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db)
    }

    async fn get_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        product::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("Product"))
    }

    async fn update(&self, product: &Product) -> Result<u64, ServiceError> {
        let res = product::Entity::update_many()
            .set(product.to_active_fields())
            .filter(product::Column::Id.eq(product.id))
            .exec(self.db.as_ref())
            .await
            .map_err(ServiceError::db)?;
        Ok(res.rows_affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        let res = product::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(ServiceError::db)?;
        Ok(res.rows_affected)
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        rows: Vec<Product>,
        next_id: i32,
        failure: Option<String>,
        calls: usize,
    }

    #[derive(Default)]
    pub struct MockProductRepository {
        state: Mutex<State>,
    }

    impl MockProductRepository {
        pub fn new() -> Self { Self::default() }

        /// Every operation fails with `ServiceError::Db(message)`.
        pub fn failing(message: &str) -> Self {
            let repo = Self::default();
            repo.state().failure = Some(message.to_string());
            repo
        }

        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize { self.state().calls }

        fn enter(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            let mut st = self.state();
            st.calls += 1;
            match &st.failure {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(st),
            }
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn create(&self, mut product: Product) -> Result<Product, ServiceError> {
            let mut st = self.enter()?;
            st.next_id += 1;
            product.id = st.next_id;
            st.rows.push(product.clone());
            Ok(product)
        }

        async fn get_all(&self) -> Result<Vec<Product>, ServiceError> {
            Ok(self.enter()?.rows.clone())
        }

        async fn get_by_id(&self, id: i32) -> Result<Product, ServiceError> {
            self.enter()?
                .rows
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("Product"))
        }

        async fn update(&self, product: &Product) -> Result<u64, ServiceError> {
            let mut st = self.enter()?;
            match st.rows.iter_mut().find(|p| p.id == product.id) {
                Some(row) => {
                    *row = product.clone();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
            let mut st = self.enter()?;
            let before = st.rows.len();
            st.rows.retain(|p| p.id != id);
            Ok((before - st.rows.len()) as u64)
        }
    }
}
