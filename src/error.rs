//! Error types for the sms-relay-rust library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the application.

use thiserror::Error;

/// Errors that can occur in the sms-relay-rust application.
#[derive(Error, Debug)]
pub enum SmsRelayError {
    /// Request input failed validation
    #[error("{0}")]
    Validation(String),

    /// The SMS gateway rejected or failed the send call
    #[error("{0}")]
    Gateway(String),

    /// The message store failed to persist a record
    #[error("Store write error: {0}")]
    StoreWrite(String),

    /// The message store failed to return records
    #[error("Store read error: {0}")]
    StoreRead(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Outbound HTTP transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with SmsRelayError
pub type Result<T> = std::result::Result<T, SmsRelayError>;

impl From<anyhow::Error> for SmsRelayError {
    fn from(err: anyhow::Error) -> Self {
        SmsRelayError::Other(err.to_string())
    }
}

impl From<config::ConfigError> for SmsRelayError {
    fn from(err: config::ConfigError) -> Self {
        SmsRelayError::InvalidConfig(err.to_string())
    }
}
