use std::sync::Arc;

use service::identity::IdentityProvider;
use service::product::ProductService;
use service::user::UserService;

#[derive(Clone, Debug)]
pub struct ServerAuthConfig {
    /// Run `/products` and `GET /users` behind the bearer-token middleware.
    pub protect_resources: bool,
}

impl Default for ServerAuthConfig {
    fn default() -> Self { Self { protect_resources: true } }
}

/// Shared handler state; every field is cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<dyn ProductService>,
    pub users: Arc<dyn UserService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub auth: ServerAuthConfig,
}
