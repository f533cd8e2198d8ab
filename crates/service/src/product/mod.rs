//! Products: SeaORM data access plus a pass-through service.

pub mod repository;
pub mod service;

pub use repository::{ProductRepository, SeaOrmProductRepository};
pub use service::{DefaultProductService, ProductService};

pub type Product = models::product::Model;
