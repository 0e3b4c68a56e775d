//! Error types for hostkv
//!
//! `StorageError` is the error currency of the [`Backend`](crate::traits::Backend)
//! trait. Facades pass it through untouched, so every backend reports
//! failures in the same vocabulary.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

use crate::key::KeyError;
use crate::limits::LimitError;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key has no value in the addressed partition
    ///
    /// Only returned by backends that treat absent reads as failures.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key rejected by validation
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// The offending key
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// Value exceeds the configured size limits
    #[error("Value too large: {actual} bytes exceeds maximum {max}")]
    ValueTooLarge {
        /// Actual size in bytes
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Backend-specific failure (host unavailable, type mismatch, ...)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StorageError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        StorageError::Backend(msg.into())
    }

    /// Create an invalid-key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StorageError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        StorageError::Config(msg.into())
    }

    /// True for backend-specific failures
    pub fn is_backend_error(&self) -> bool {
        matches!(self, StorageError::Backend(_))
    }

    /// True when the error reports a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::KeyNotFound(_))
    }

    /// True for key and value validation failures
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidKey { .. } | StorageError::ValueTooLarge { .. }
        )
    }

    /// Attach the offending key to a key validation failure
    pub fn from_key_error(key: &str, err: KeyError) -> Self {
        StorageError::invalid_key(key, err.to_string())
    }
}

impl From<LimitError> for StorageError {
    fn from(e: LimitError) -> Self {
        match e {
            LimitError::ValueTooLarge { actual, max } => {
                StorageError::ValueTooLarge { actual, max }
            }
        }
    }
}
