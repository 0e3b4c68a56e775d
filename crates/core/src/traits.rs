//! Backend abstraction
//!
//! This module defines the `Backend` and `ChangeSink` traits that sit at the
//! boundary between the facades and the host's storage. Everything behind
//! `Backend` (persistence, default resolution, change detection) is owned by
//! the implementation.

use std::sync::Arc;

use crate::error::StorageResult;
use crate::partition::Partition;
use crate::value::Value;

/// Host key-value storage addressed by partition index
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait Backend: Send + Sync {
    /// Register `value` as the default for `key`
    ///
    /// A default never overrides an explicit value. Which default wins when
    /// several are registered is backend-defined; the in-workspace backends
    /// keep the first one.
    fn set_default_value(&self, partition: Partition, key: &str, value: Value)
        -> StorageResult<()>;

    /// Whether `key` has an explicit value or a default
    fn has_key(&self, partition: Partition, key: &str) -> StorageResult<bool>;

    /// Current value for `key`: explicit value, else default
    ///
    /// Returns `None` when the key has neither. Backends that treat absent
    /// reads as failures may return `StorageError::KeyNotFound` instead.
    fn get_value(&self, partition: Partition, key: &str) -> StorageResult<Option<Value>>;

    /// Store an explicit value, overriding any previous value or default
    fn set_value(&self, partition: Partition, key: &str, value: Value) -> StorageResult<()>;

    /// Register an observer for changes in `partition`
    ///
    /// Backends without change reporting accept the sink and never call it.
    fn watch(&self, _partition: Partition, _sink: Arc<dyn ChangeSink>) -> StorageResult<()> {
        Ok(())
    }

    /// Remove a sink previously passed to `watch`
    ///
    /// Sinks are matched by identity. Returns `false` if the sink was not
    /// registered for `partition`.
    fn unwatch(
        &self,
        _partition: Partition,
        _sink: &Arc<dyn ChangeSink>,
    ) -> StorageResult<bool> {
        Ok(false)
    }
}

/// Receiver of backend-originated change notifications
///
/// Called synchronously on the thread that made the change, after the
/// backend has released its own locks.
pub trait ChangeSink: Send + Sync {
    /// The effective value of `key` in `partition` changed
    fn key_changed(&self, partition: Partition, key: &str);
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn set_default_value(
        &self,
        partition: Partition,
        key: &str,
        value: Value,
    ) -> StorageResult<()> {
        (**self).set_default_value(partition, key, value)
    }

    fn has_key(&self, partition: Partition, key: &str) -> StorageResult<bool> {
        (**self).has_key(partition, key)
    }

    fn get_value(&self, partition: Partition, key: &str) -> StorageResult<Option<Value>> {
        (**self).get_value(partition, key)
    }

    fn set_value(&self, partition: Partition, key: &str, value: Value) -> StorageResult<()> {
        (**self).set_value(partition, key, value)
    }

    fn watch(&self, partition: Partition, sink: Arc<dyn ChangeSink>) -> StorageResult<()> {
        (**self).watch(partition, sink)
    }

    fn unwatch(&self, partition: Partition, sink: &Arc<dyn ChangeSink>) -> StorageResult<bool> {
        (**self).unwatch(partition, sink)
    }
}
