//! Partition addressing
//!
//! A partition is an isolated namespace in the backend, selected by an
//! integer index. Keys in different partitions never collide.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a backend partition
///
/// Fixed at facade construction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(u32);

impl Partition {
    /// Persistent configuration store
    pub const CONFIG: Partition = Partition(0);

    /// Session-scoped store
    pub const SESSION: Partition = Partition(1);

    /// Create a partition from a raw index
    pub const fn new(index: u32) -> Self {
        Partition(index)
    }

    /// Raw index
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl From<u32> for Partition {
    fn from(index: u32) -> Self {
        Partition(index)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Partition::CONFIG => f.write_str("config(0)"),
            Partition::SESSION => f.write_str("session(1)"),
            Partition(i) => write!(f, "partition({})", i),
        }
    }
}
