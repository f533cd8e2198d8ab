use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::debug;

use service::product::Product;

use super::auth::AuthSubject;
use crate::errors::ApiError;
use crate::state::ServerState;

/// Positive `i32` or 400 `invalid id param`.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::invalid_id)
}

pub async fn create(
    State(state): State<ServerState>,
    subject: Option<Extension<AuthSubject>>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(product) = body?;
    if let Some(Extension(AuthSubject(uid))) = subject {
        debug!(%uid, "create product");
    }
    let created = state.products.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_all(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.get_all_products().await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.products.get_product_by_id(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    subject: Option<Extension<AuthSubject>>,
    body: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(product) = body?;
    if product.id <= 0 {
        return Err(ApiError::invalid_id());
    }
    if let Some(Extension(AuthSubject(uid))) = subject {
        debug!(%uid, id = product.id, "update product");
    }
    Ok(Json(state.products.update_product(product).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    subject: Option<Extension<AuthSubject>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if let Some(Extension(AuthSubject(uid))) = subject {
        debug!(%uid, id, "delete product");
    }
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for raw in ["0", "-1", "abc", "", "1.5", "99999999999"] {
            assert!(matches!(parse_id(raw), Err(ApiError::BadRequest(_))), "{raw}");
        }
    }
}
