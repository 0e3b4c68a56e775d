//! Process-wide storage bundle
//!
//! `Storages` pairs the configuration and session facades over one backend.
//! Build it once during process initialization and hand out clones (or an
//! `Arc`) to everything that needs storage. There is no global lookup.

use std::sync::Arc;

use hostkv_core::{Backend, StorageResult};
use hostkv_storage::MemoryBackend;
use tracing::info;

use crate::facade::{ConfigStorage, KeyValueStorage, SessionStorage};
use crate::settings::StorageSettings;

/// The `config` and `session` facades of one backend
#[derive(Debug, Clone)]
pub struct Storages {
    config: Arc<ConfigStorage>,
    session: Arc<SessionStorage>,
}

impl Storages {
    /// Bind both facades to `backend`
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it refuses the configuration change sink.
    pub fn connect(backend: Arc<dyn Backend>) -> StorageResult<Self> {
        let config = ConfigStorage::new(Arc::clone(&backend))?;
        let session = SessionStorage::new(backend);
        info!(target: "hostkv::facade", "Storage facades connected");
        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(session),
        })
    }

    /// Bind both facades to `backend` and register the defaults from `settings`
    ///
    /// Defaults go through `set_default`, so values already stored in the
    /// backend are left untouched.
    pub fn from_settings(
        backend: Arc<dyn Backend>,
        settings: &StorageSettings,
    ) -> StorageResult<Self> {
        let storages = Self::connect(backend)?;

        let config_defaults = settings.config_defaults()?;
        let session_defaults = settings.session_defaults()?;
        for (key, value) in config_defaults.iter().cloned() {
            storages.config.set_default(&key, value)?;
        }
        for (key, value) in session_defaults.iter().cloned() {
            storages.session.set_default(&key, value)?;
        }

        info!(
            target: "hostkv::facade",
            config_defaults = config_defaults.len(),
            session_defaults = session_defaults.len(),
            "Registered startup defaults"
        );
        Ok(storages)
    }

    /// Fresh in-memory backend with default limits
    pub fn in_memory() -> StorageResult<Self> {
        Self::connect(Arc::new(MemoryBackend::new()))
    }

    /// Fresh in-memory backend configured by `settings`
    pub fn in_memory_with_settings(settings: &StorageSettings) -> StorageResult<Self> {
        settings.validate()?;
        let backend = Arc::new(MemoryBackend::with_limits(settings.limits()));
        Self::from_settings(backend, settings)
    }

    /// Persistent configuration facade (partition 0)
    pub fn config(&self) -> &Arc<ConfigStorage> {
        &self.config
    }

    /// Session facade (partition 1)
    pub fn session(&self) -> &Arc<SessionStorage> {
        &self.session
    }
}
