//! Service layer for the shop backend.
//! - Repositories wrap SeaORM access to the `models` entities.
//! - Services hold the business operations the HTTP layer calls.
//! - The identity module talks to the external identity provider.

pub mod errors;
pub mod identity;
pub mod product;
pub mod user;

pub use errors::ServiceError;
