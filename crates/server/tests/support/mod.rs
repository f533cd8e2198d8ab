#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::{ServerAuthConfig, ServerState};
use service::identity::provider::mock::MockIdentityProvider;
use service::product::repository::mock::MockProductRepository;
use service::product::DefaultProductService;
use service::user::repository::mock::MockUserRepository;
use service::user::DefaultUserService;

pub const GOOD_TOKEN: &str = "good-token";
pub const GOOD_UID: &str = "uid-1";

pub struct TestApp {
    pub router: Router,
    pub products: Arc<MockProductRepository>,
    pub users: Arc<MockUserRepository>,
    pub identity: Arc<MockIdentityProvider>,
}

pub fn app(protect_resources: bool) -> TestApp {
    app_with(protect_resources, MockProductRepository::new())
}

pub fn app_with(protect_resources: bool, products: MockProductRepository) -> TestApp {
    let products = Arc::new(products);
    let users = Arc::new(MockUserRepository::new());
    let identity = Arc::new(MockIdentityProvider::new().with_token(GOOD_TOKEN, GOOD_UID));
    let state = ServerState {
        products: Arc::new(DefaultProductService::new(products.clone())),
        users: Arc::new(DefaultUserService::new(users.clone(), identity.clone())),
        identity: identity.clone(),
        auth: ServerAuthConfig { protect_resources },
    };
    let router = routes::build_router(state, CorsLayer::very_permissive());
    TestApp { router, products, users, identity }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, body)
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, None)
}

pub fn json(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(method, uri, token, Some(body.to_string()))
}

pub fn raw(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    request(method, uri, token, Some(body.to_string()))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<String>) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {}", t));
    }
    match body {
        Some(s) => b.header("content-type", "application/json").body(Body::from(s)).unwrap(),
        None => b.body(Body::empty()).unwrap(),
    }
}
