use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use service::user::{CreateUserRequest, User};

use super::auth::AuthSubject;
use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(req) = body?;
    let user = state.users.create_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_all(State(state): State<ServerState>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.users.get_users().await?))
}

/// Local record of the authenticated caller.
pub async fn me(
    State(state): State<ServerState>,
    Extension(AuthSubject(uid)): Extension<AuthSubject>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user(&uid).await?))
}
