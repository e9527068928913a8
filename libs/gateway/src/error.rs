//! Custom error types for the remote gateway

use thiserror::Error;

/// Custom error type for calls against the album backend
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The backend answered with a non-success status
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// Server-provided explanation, taken from the `error` or `message` field
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response did not match the expected schema
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// The request could not be built from the configured base URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl GatewayError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Explanation supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True for 401 and 403 answers
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Type alias for gateway results
pub type GatewayResult<T> = Result<T, GatewayError>;
