//! Error types for Platinum controller operations
//!
//! All failures surface as typed, recoverable errors returned to the caller;
//! malformed device data never aborts the process.

use thiserror::Error;

/// Result type alias for Platinum operations
pub type Result<T> = std::result::Result<T, PlatinumError>;

/// Error types for Platinum controller operations
#[derive(Error, Debug)]
pub enum PlatinumError {
    /// Connection errors (resolve/dial failure, connection closed mid-session)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Read deadline expiry
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Malformed device data (missing delimiter, bad height field, truncated dump)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found errors (rooms, shades)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl PlatinumError {
    /// Create a connection error
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        PlatinumError::Connection(msg.into())
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        PlatinumError::Timeout(msg.into())
    }

    /// Create a protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        PlatinumError::Protocol(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        PlatinumError::InvalidInput(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        PlatinumError::NotFound(msg.into())
    }

    /// Check if error is retryable by an external caller
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlatinumError::Connection(_) | PlatinumError::Timeout(_) | PlatinumError::Io(_)
        )
    }

    /// Check if error indicates malformed device data
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, PlatinumError::Protocol(_))
    }
}
