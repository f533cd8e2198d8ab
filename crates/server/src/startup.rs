use std::{sync::Arc, time::Duration};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::identity::{IdentityProvider, IdentityToolkitClient, IdentityToolkitConfig};
use service::product::{DefaultProductService, SeaOrmProductRepository};
use service::user::{DefaultUserService, SeaOrmUserRepository};

use crate::errors::StartupError;
use crate::routes;
use crate::state::{ServerAuthConfig, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Identity Toolkit client from the `[identity]` config section.
pub fn build_identity(cfg: &AppConfig) -> Result<Arc<dyn IdentityProvider>, StartupError> {
    let id = &cfg.identity;
    let client = IdentityToolkitClient::new(IdentityToolkitConfig {
        base_url: id.base_url.clone(),
        project_id: id.project_id.clone(),
        api_key: id.api_key.clone(),
        access_token: id.access_token.clone(),
        timeout: Duration::from_secs(id.timeout_secs),
    })?;
    Ok(Arc::new(client))
}

/// Wire repositories, services and the identity provider into handler state.
pub fn build_state(
    cfg: &AppConfig,
    db: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
) -> ServerState {
    let db = Arc::new(db);
    let product_repo = Arc::new(SeaOrmProductRepository::new(db.clone()));
    let user_repo = Arc::new(SeaOrmUserRepository::new(db));
    ServerState {
        products: Arc::new(DefaultProductService::new(product_repo)),
        users: Arc::new(DefaultUserService::new(user_repo, identity.clone())),
        identity,
        auth: ServerAuthConfig { protect_resources: cfg.auth.protect_resources },
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Connect, migrate, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!(service = "server", event = "migrations_applied", "schema up to date");

    let identity = build_identity(&cfg)?;
    let state = build_state(&cfg, db, identity);
    let app: Router = routes::build_router(state, build_cors());

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        service = "server",
        event = "listening",
        %addr,
        protect_resources = cfg.auth.protect_resources,
        identity_base = %cfg.identity.base_url,
        "server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
