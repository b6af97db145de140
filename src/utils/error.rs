//! Custom error types for cert-expiry-watch
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes of the policy store, the event pipeline and the
//! certificate reader.

use thiserror::Error;

/// Top-level error type for the cert-expiry-watch application
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the durable key-value collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {key}: {message}")]
    Read { key: String, message: String },

    #[error("Failed to write {key}: {message}")]
    Write { key: String, message: String },

    #[error("Stored value for {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Threshold policy errors
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid threshold {value:?}: {message}")]
    Validation { value: String, message: String },

    #[error("{hostname} is already customized")]
    AlreadyCustomized { hostname: String },

    #[error("Policy store unavailable: {0}")]
    Store(#[from] StoreError),
}

impl PolicyError {
    pub(crate) fn validation(value: impl ToString, message: impl Into<String>) -> Self {
        PolicyError::Validation {
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error came from the backing store rather than the caller
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, PolicyError::Store(_))
    }
}

/// Malformed inbound events from the capture hook
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Invalid request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to decode event: {message}")]
    Decode { message: String },
}

/// Certificate reading and parsing errors
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("Failed to read certificate file {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("Failed to parse certificate: {message}")]
    ParseError { message: String },

    #[error("No certificates found in {source_name}")]
    Empty { source_name: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

/// Result type alias using WatchError
pub type Result<T> = std::result::Result<T, WatchError>;
