//! Size limits for keys and values
//!
//! Backends enforce these limits on write. The facade layer never checks
//! them itself.

use crate::Value;
use thiserror::Error;

/// Size limits for keys and values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum key length in bytes (default: 1024)
    pub max_key_bytes: usize,

    /// Maximum string value length in bytes (default: 1MB)
    pub max_string_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 1024,
            max_string_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 16,
            max_string_bytes: 64,
        }
    }

    /// Validate a value against size limits
    ///
    /// Only strings carry a size; the other scalars always pass.
    pub fn validate_value(&self, value: &Value) -> Result<(), LimitError> {
        match value {
            Value::String(s) if s.len() > self.max_string_bytes => {
                Err(LimitError::ValueTooLarge {
                    actual: s.len(),
                    max: self.max_string_bytes,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Limit validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Value exceeds size limits
    #[error("Value too large: {actual} exceeds maximum {max}")]
    ValueTooLarge {
        /// Actual size
        actual: usize,
        /// Maximum allowed size
        max: usize,
    },
}
