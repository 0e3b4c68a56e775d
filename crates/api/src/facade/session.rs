//! Session facade (partition 1)

use std::sync::Arc;

use hostkv_core::{Backend, Partition, StorageResult, Value};

use super::{KeyValueFacade, KeyValueStorage};

/// Session-scoped facade
///
/// Same operations as [`KeyValueFacade`], fixed to partition 1. Whether
/// session values survive a restart is up to the backend.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    facade: KeyValueFacade,
}

impl SessionStorage {
    /// Bind to partition 1 of `backend`
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            facade: KeyValueFacade::new(backend, Partition::SESSION),
        }
    }
}

impl KeyValueStorage for SessionStorage {
    #[inline]
    fn partition(&self) -> Partition {
        self.facade.partition()
    }

    fn set_default(&self, key: &str, value: Value) -> StorageResult<()> {
        self.facade.set_default(key, value)
    }

    fn has_key(&self, key: &str) -> StorageResult<bool> {
        self.facade.has_key(key)
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        self.facade.get(key)
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        self.facade.set(key, value)
    }
}
