//! Custom error types for the album and image stores

use gateway::GatewayError;
use thiserror::Error;

/// Error surfaced by a store operation
///
/// Each store keeps at most one of these as its current error; a newer one
/// replaces the older.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Share list contained addresses that are not `local@domain.tld` shaped
    #[error("Invalid email(s): {}", .0.join(", "))]
    InvalidEmails(Vec<String>),

    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Caller may not perform the operation
    #[error("You are not authorized to do so")]
    Unauthorized,

    /// Request failed; server message when one was given, else a fallback
    #[error("{0}")]
    Request(String),

    /// No session token is available
    #[error("You must log in")]
    Unauthenticated,

    /// Backend answered with a payload that does not match its schema
    #[error("Unexpected response from the server: {0}")]
    MalformedResponse(String),
}

impl StoreError {
    /// Classify a gateway failure, using `fallback` when the server gave no reason
    pub fn classify(err: GatewayError, fallback: &str) -> Self {
        match err {
            err if err.is_auth_failure() => StoreError::Unauthorized,
            GatewayError::MalformedResponse { endpoint, reason } => {
                StoreError::MalformedResponse(format!("{}: {}", endpoint, reason))
            }
            GatewayError::Status { message, .. } => {
                StoreError::Request(message.unwrap_or_else(|| fallback.to_string()))
            }
            GatewayError::Transport(_) | GatewayError::InvalidEndpoint(_) => {
                StoreError::Request(fallback.to_string())
            }
        }
    }

    /// True for errors raised before anything was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidEmails(_) | StoreError::Validation(_) | StoreError::Unauthenticated
        )
    }
}

/// Type alias for store results
pub type StoreResult<T> = Result<T, StoreError>;
