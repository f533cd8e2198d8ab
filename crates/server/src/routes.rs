use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Pong;

use crate::state::ServerState;

pub mod auth;
pub mod products;
pub mod users;

pub async fn ping() -> Json<Pong> {
    Json(Pong::default())
}

/// Build the application router.
///
/// `/ping` and `POST /users` are always public and `GET /users/me` always
/// requires a token. The product routes and `GET /users` are guarded when
/// `state.auth.protect_resources` is set.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let guard = middleware::from_fn_with_state(state.clone(), auth::require_bearer_token);
    let protect = state.auth.protect_resources;

    let mut product_routes = Router::new()
        .route(
            "/products",
            get(products::get_all).post(products::create).put(products::update),
        )
        .route("/products/:id", get(products::get_by_id).delete(products::delete));
    if protect {
        product_routes = product_routes.route_layer(guard.clone());
    }

    let mut list_users = get(users::get_all);
    if protect {
        list_users = list_users.route_layer(guard.clone());
    }
    let user_routes = Router::new()
        .route("/users", list_users.post(users::create))
        .route("/users/me", get(users::me).route_layer(guard));

    Router::new()
        .route("/ping", get(ping))
        .merge(product_routes)
        .merge(user_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
