//! Identity provider port: issues user identities, verifies bearer tokens and
//! removes identities when a later step fails.

pub mod errors;
pub mod provider;
pub mod toolkit;

pub use errors::IdentityError;
pub use provider::{IdentityProvider, NewIdentity};
pub use toolkit::{IdentityToolkitClient, IdentityToolkitConfig};
