//! Error types for the answer gateway.

use charla_core::CharlaError;
use thiserror::Error;

/// Errors from the generative-answer backend.
///
/// The orchestrator treats every variant uniformly as "unavailable"; the
/// distinctions exist for logs.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("timed out after {0} seconds")]
    Timeout(u64),

    #[error("environment variable {0} is not set")]
    MissingApiKey(String),
}

impl From<GatewayError> for CharlaError {
    fn from(err: GatewayError) -> Self {
        CharlaError::Gateway(err.to_string())
    }
}

/// A specialized `Result` type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
