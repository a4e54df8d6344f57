//! Error types for talking to the rates API.

/// Failure to complete an HTTP exchange.
///
/// Anything the remote service answered, whatever the status, is an
/// `ApiResponse`, never an `ApiError`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}
