use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /ping`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    pub message: String,
}

impl Default for Pong {
    fn default() -> Self {
        Self { message: "pong".into() }
    }
}

/// Error body shared by every non-2xx JSON response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
