use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Uid of the caller, resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject(pub String);

/// Strip a leading `Bearer` scheme and surrounding whitespace. A header
/// without the scheme is taken as the bare token.
pub fn bearer_token(header: &str) -> String {
    let header = header.trim();
    header.strip_prefix("Bearer").unwrap_or(header).trim().to_string()
}

/// Verify `Authorization: Bearer <token>` with the identity provider and put
/// the resolved [`AuthSubject`] into request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(bearer_token)
        .unwrap_or_default();

    if token.is_empty() {
        debug!(path = %req.uri().path(), "missing bearer token");
        return Err(ApiError::Unauthorized("Unauthorized".into()));
    }

    match state.identity.verify_token(&token).await {
        Ok(uid) => {
            req.extensions_mut().insert(AuthSubject(uid));
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %req.uri().path(), error = %e, "token verification failed");
            Err(ApiError::Unauthorized("Invalid token".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix_and_whitespace() {
        assert_eq!(bearer_token("Bearer abc.def"), "abc.def");
        assert_eq!(bearer_token("  Bearer   abc  "), "abc");
        assert_eq!(bearer_token("abc"), "abc");
        assert_eq!(bearer_token("Bearer "), "");
    }

    #[test]
    fn keeps_scheme_word_inside_token() {
        assert_eq!(bearer_token("Bearer abcBearerdef"), "abcBearerdef");
        assert_eq!(bearer_token("tokenBearer"), "tokenBearer");
    }
}
