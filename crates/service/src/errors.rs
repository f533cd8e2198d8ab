use thiserror::Error;

use crate::identity::IdentityError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("identity provider error: {0}")]
    Identity(#[from] IdentityError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(err: impl std::fmt::Display) -> Self { Self::Db(err.to_string()) }
}
