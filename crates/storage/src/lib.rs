//! Storage backends for hostkv
//!
//! This crate implements the in-memory reference backend:
//! - MemoryBackend: DashMap sharded by partition, FxHashMap within
//! - Shard: per-partition defaults and explicit values
//! - Change sinks notified when an effective value changes
//!
//! Real hosts plug their own `Backend` in; `MemoryBackend` is what tests
//! and embedders without a host use.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod shard;

pub use memory::MemoryBackend;
pub use shard::Shard;
