//! Facade over an arbitrary partition

use std::fmt;
use std::sync::Arc;

use hostkv_core::{Backend, Partition, StorageResult, Value};
use tracing::trace;

use super::KeyValueStorage;

/// Stateless accessor for one backend partition
///
/// Holds nothing but the partition index and a shared backend handle.
/// Cloning is cheap and clones address the same partition.
#[derive(Clone)]
pub struct KeyValueFacade {
    partition: Partition,
    backend: Arc<dyn Backend>,
}

impl KeyValueFacade {
    /// Bind a facade to `partition`
    pub fn new(backend: Arc<dyn Backend>, partition: Partition) -> Self {
        Self { partition, backend }
    }

    /// Shared backend handle
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }
}

impl fmt::Debug for KeyValueFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueFacade")
            .field("partition", &self.partition)
            .finish()
    }
}

impl KeyValueStorage for KeyValueFacade {
    #[inline]
    fn partition(&self) -> Partition {
        self.partition
    }

    fn set_default(&self, key: &str, value: Value) -> StorageResult<()> {
        trace!(target: "hostkv::facade", partition = %self.partition, key, %value, "set_default");
        self.backend.set_default_value(self.partition, key, value)
    }

    fn has_key(&self, key: &str) -> StorageResult<bool> {
        trace!(target: "hostkv::facade", partition = %self.partition, key, "has_key");
        self.backend.has_key(self.partition, key)
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        trace!(target: "hostkv::facade", partition = %self.partition, key, "get");
        self.backend.get_value(self.partition, key)
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        trace!(target: "hostkv::facade", partition = %self.partition, key, %value, "set");
        self.backend.set_value(self.partition, key, value)
    }
}
