use thiserror::Error;

/// Failures talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("identity provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("unexpected identity provider response: {0}")]
    Decode(String),
}
