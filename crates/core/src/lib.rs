//! Core types and traits for hostkv
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: Scalar value stored under a key
//! - Partition: Index of an isolated backend namespace
//! - StorageError: Error type shared by all backends
//! - Limits / key validation: Size and shape rules enforced by backends
//! - Traits: `Backend` (host storage boundary) and `ChangeSink`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod limits;
pub mod partition;
pub mod traits;
pub mod value;

pub use error::{StorageError, StorageResult};
pub use key::{validate_key, validate_key_with_limits, KeyError};
pub use limits::{LimitError, Limits};
pub use partition::Partition;
pub use traits::{Backend, ChangeSink};
pub use value::Value;
