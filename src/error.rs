//! Error types shared by the API clients.

use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. The raw body is kept
    /// so callers can show what the API said.
    #[error("{service} responded with HTTP {status}: {body}")]
    Status { service: &'static str, status: u16, body: String },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} credentials are not configured")]
    MissingCredentials(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] wreq::Error),
}

impl ApiError {
    /// Returns the raw response body for status errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}
