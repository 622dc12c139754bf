//! Error types for the summarization service client.
//!
//! Defines [`ApiError`] with variants for transport failures, non-success
//! HTTP statuses and application-level rejections. Uses `thiserror` to derive
//! `Display` and `Error` from the `#[error(...)]` attributes.

use thiserror::Error;

/// Shown whenever the service cannot be reached at the transport level.
pub const CONNECT_FAILED: &str =
    "cannot reach the summarization service; make sure it is running";

/// Fallback when the service reports a failure without a usable message.
pub const GENERIC_FAILURE: &str = "the summarization service reported an error";

/// Errors produced while talking to the summarization service.
///
/// The variants cover the three failure classes the service exhibits:
/// - [`Service`](ApiError::Service) — a non-success HTTP status
/// - [`Rejected`](ApiError::Rejected) — HTTP success but `ok: false` in the body
/// - [`Network`](ApiError::Network) — transport-level failure
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success HTTP status.
    #[error("service returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// The service was reachable but refused the request.
    #[error("{message}")]
    Rejected { message: String },

    /// Underlying transport failure (DNS, connection refused, reset).
    #[error("cannot reach the summarization service: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("failed to parse service response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Message suitable for terminal output. Transport failures collapse to
    /// one generic line; the raw cause stays available through `Display`.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => CONNECT_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}
