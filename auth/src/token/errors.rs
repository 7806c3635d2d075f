use thiserror::Error;

/// Error type for token operations.
///
/// The variants exist for logging and tests. Callers exposing a verdict to
/// clients should collapse them into a single "invalid token" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Token is expired")]
    Expired,
}
