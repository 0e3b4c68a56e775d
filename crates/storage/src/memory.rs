//! In-memory backend
//!
//! # Design
//!
//! - DashMap: one shard per partition, partitions never contend
//! - FxHashMap inside each shard for O(1) lookups
//! - Defaults and explicit values kept apart so a default never overrides
//!   an explicit value and the first default wins
//!
//! # Change Reporting
//!
//! `set_value`, `remove` and `clear_partition` notify the sinks watching the
//! partition when the effective value of a key changes. Sinks run on the
//! writer's thread, in registration order, after the shard guard is
//! released. Registering a default is not a change.

use dashmap::DashMap;
use hostkv_core::{
    validate_key_with_limits, Backend, ChangeSink, Limits, Partition, StorageError,
    StorageResult, Value,
};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::shard::Shard;

/// In-memory, partition-sharded backend
///
/// # Example
///
/// ```
/// use hostkv_core::{Backend, Partition, Value};
/// use hostkv_storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// backend.set_default_value(Partition::CONFIG, "volume", Value::Int(80)).unwrap();
/// assert_eq!(
///     backend.get_value(Partition::CONFIG, "volume").unwrap(),
///     Some(Value::Int(80))
/// );
/// ```
pub struct MemoryBackend {
    shards: DashMap<Partition, Shard>,
    sinks: RwLock<FxHashMap<Partition, Vec<Arc<dyn ChangeSink>>>>,
    limits: Limits,
}

impl MemoryBackend {
    /// Create an empty backend with default limits
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty backend with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            shards: DashMap::new(),
            sinks: RwLock::new(FxHashMap::default()),
            limits,
        }
    }

    /// Limits enforced on writes
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Drop the explicit value for `key`, revealing its default
    ///
    /// Returns `true` if an explicit value existed.
    pub fn remove(&self, partition: Partition, key: &str) -> StorageResult<bool> {
        self.validate_key(key)?;
        let (existed, changed) = match self.shards.get_mut(&partition) {
            Some(mut shard) => shard.remove(key),
            None => (false, false),
        };
        if changed {
            self.notify(partition, key);
        }
        Ok(existed)
    }

    /// Keys with a value or a default in `partition`, sorted
    pub fn keys(&self, partition: Partition) -> Vec<String> {
        self.shards
            .get(&partition)
            .map(|shard| shard.keys())
            .unwrap_or_default()
    }

    /// Number of keys in `partition`
    pub fn len(&self, partition: Partition) -> usize {
        self.shards
            .get(&partition)
            .map(|shard| shard.len())
            .unwrap_or(0)
    }

    /// Whether `partition` holds no keys
    pub fn is_empty(&self, partition: Partition) -> bool {
        self.len(partition) == 0
    }

    /// Drop every default and value in `partition`
    ///
    /// Every removed key is reported to the partition's sinks. Returns the
    /// number of keys removed.
    pub fn clear_partition(&self, partition: Partition) -> usize {
        let keys = self
            .shards
            .remove(&partition)
            .map(|(_, shard)| shard.keys())
            .unwrap_or_default();
        debug!(target: "hostkv::storage", %partition, removed = keys.len(), "Cleared partition");
        for key in &keys {
            self.notify(partition, key);
        }
        keys.len()
    }

    /// Number of sinks watching `partition`
    pub fn sink_count(&self, partition: Partition) -> usize {
        self.sinks
            .read()
            .get(&partition)
            .map(|sinks| sinks.len())
            .unwrap_or(0)
    }

    fn validate_key(&self, key: &str) -> StorageResult<()> {
        validate_key_with_limits(key, &self.limits)
            .map_err(|e| StorageError::from_key_error(key, e))
    }

    fn notify(&self, partition: Partition, key: &str) {
        // Clone out so sinks may call back into the backend
        let sinks: Vec<Arc<dyn ChangeSink>> = match self.sinks.read().get(&partition) {
            Some(sinks) => sinks.clone(),
            None => return,
        };
        trace!(
            target: "hostkv::storage",
            %partition,
            key,
            sinks = sinks.len(),
            "Notifying change"
        );
        for sink in sinks {
            sink.key_changed(partition, key);
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("partitions", &self.shards.len())
            .field("limits", &self.limits)
            .finish()
    }
}

impl Backend for MemoryBackend {
    fn set_default_value(
        &self,
        partition: Partition,
        key: &str,
        value: Value,
    ) -> StorageResult<()> {
        self.validate_key(key)?;
        self.limits.validate_value(&value)?;
        let mut shard = self.shards.entry(partition).or_default();
        if !shard.set_default(key, value) {
            debug!(
                target: "hostkv::storage",
                %partition,
                key,
                "Default already registered, ignoring"
            );
        }
        Ok(())
    }

    fn has_key(&self, partition: Partition, key: &str) -> StorageResult<bool> {
        self.validate_key(key)?;
        Ok(self
            .shards
            .get(&partition)
            .map(|shard| shard.contains(key))
            .unwrap_or(false))
    }

    fn get_value(&self, partition: Partition, key: &str) -> StorageResult<Option<Value>> {
        self.validate_key(key)?;
        Ok(self
            .shards
            .get(&partition)
            .and_then(|shard| shard.get(key).cloned()))
    }

    fn set_value(&self, partition: Partition, key: &str, value: Value) -> StorageResult<()> {
        self.validate_key(key)?;
        self.limits.validate_value(&value)?;
        let changed = self.shards.entry(partition).or_default().set(key, value);
        if changed {
            self.notify(partition, key);
        }
        Ok(())
    }

    fn watch(&self, partition: Partition, sink: Arc<dyn ChangeSink>) -> StorageResult<()> {
        self.sinks.write().entry(partition).or_default().push(sink);
        debug!(target: "hostkv::storage", %partition, "Registered change sink");
        Ok(())
    }

    fn unwatch(&self, partition: Partition, sink: &Arc<dyn ChangeSink>) -> StorageResult<bool> {
        let mut sinks = self.sinks.write();
        let Some(registered) = sinks.get_mut(&partition) else {
            return Ok(false);
        };
        let before = registered.len();
        registered.retain(|s| !same_sink(s, sink));
        let removed = registered.len() < before;
        if registered.is_empty() {
            sinks.remove(&partition);
        }
        if removed {
            debug!(target: "hostkv::storage", %partition, "Removed change sink");
        }
        Ok(removed)
    }
}

// Data pointer only: vtable pointers for one type may differ across codegen units
fn same_sink(a: &Arc<dyn ChangeSink>, b: &Arc<dyn ChangeSink>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
