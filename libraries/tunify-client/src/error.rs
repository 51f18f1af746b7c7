//! Error types for the Tunify client.

use thiserror::Error;

/// Errors that can occur when talking to the data store or the search API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// Server is offline or unreachable
    #[error("Network error: unable to connect to {0}")]
    ServerUnreachable(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// No credentials record for the username
    #[error("User not found")]
    UserNotFound,

    /// Credentials record exists but the password differs
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Username already registered
    #[error("User already exists")]
    UserExists,

    /// Operation needs a signed-in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// Rejected before any request was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error while persisting the session
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status carried by a server error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
