//! Users: local mirror of identities minted by the identity provider.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{CreateUserRequest, User};
pub use repository::{SeaOrmUserRepository, UserRepository};
pub use service::{DefaultUserService, UserService};
