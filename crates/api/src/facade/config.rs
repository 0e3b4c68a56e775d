//! Configuration facade (partition 0) with change notification
//!
//! `ConfigStorage` registers the "ConfigChanged" signal at construction and
//! hooks a change sink into the backend; dropping it unhooks the sink. The
//! facade never raises the signal from its own `set`: it fires only when the
//! backend reports that the effective value of a key in partition 0 changed,
//! whoever wrote it.

use std::fmt;
use std::sync::{Arc, Weak};

use hostkv_core::{Backend, ChangeSink, Partition, StorageResult, Value};
use hostkv_signals::{ListenerId, SignalError, SignalHub};
use tracing::{debug, warn};

use super::{KeyValueFacade, KeyValueStorage};

/// Name of the configuration change signal
pub const CONFIG_CHANGED: &str = "ConfigChanged";

/// Payload of the "ConfigChanged" signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChanged {
    /// Key whose effective value changed
    pub key: String,
}

/// Persistent configuration facade
///
/// Key-value operations go to partition 0. Listeners connected to
/// [`CONFIG_CHANGED`] are called once per backend-reported change, in
/// connection order, on the thread that made the change.
pub struct ConfigStorage {
    facade: KeyValueFacade,
    notifier: Arc<SignalHub<ConfigChanged>>,
    forwarder: Arc<dyn ChangeSink>,
}

impl ConfigStorage {
    /// Bind to partition 0 of `backend` and start forwarding its changes
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it refuses the change sink.
    pub fn new(backend: Arc<dyn Backend>) -> StorageResult<Self> {
        let notifier = Arc::new(SignalHub::with_signals(&[CONFIG_CHANGED]));
        let forwarder: Arc<dyn ChangeSink> = Arc::new(ChangeForwarder {
            partition: Partition::CONFIG,
            notifier: Arc::downgrade(&notifier),
        });
        backend.watch(Partition::CONFIG, Arc::clone(&forwarder))?;

        Ok(Self {
            facade: KeyValueFacade::new(backend, Partition::CONFIG),
            notifier,
            forwarder,
        })
    }

    /// The signal hub backing this facade
    pub fn notifier(&self) -> &SignalHub<ConfigChanged> {
        &self.notifier
    }

    /// Connect a listener to a registered signal
    pub fn connect<F>(&self, signal: &str, listener: F) -> Result<ListenerId, SignalError>
    where
        F: Fn(&ConfigChanged) + Send + Sync + 'static,
    {
        self.notifier.connect(signal, listener)
    }

    /// Disconnect a listener; `false` if it was not connected
    pub fn disconnect(&self, signal: &str, id: ListenerId) -> Result<bool, SignalError> {
        self.notifier.disconnect(signal, id)
    }

    /// Connect a listener to "ConfigChanged"
    pub fn on_config_changed<F>(&self, listener: F) -> Result<ListenerId, SignalError>
    where
        F: Fn(&ConfigChanged) + Send + Sync + 'static,
    {
        self.connect(CONFIG_CHANGED, listener)
    }

    /// Raise "ConfigChanged" for `key` directly
    ///
    /// For hosts that learn about changes out of band (another process, a
    /// preferences dialog) and whose backend does not report them through
    /// `Backend::watch`. Returns the number of listeners called.
    pub fn emit_config_changed(&self, key: &str) -> usize {
        dispatch(&self.notifier, key)
    }
}

impl fmt::Debug for ConfigStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStorage")
            .field("facade", &self.facade)
            .field("notifier", &self.notifier)
            .finish()
    }
}

impl Drop for ConfigStorage {
    fn drop(&mut self) {
        if let Err(e) = self
            .facade
            .backend()
            .unwatch(Partition::CONFIG, &self.forwarder)
        {
            warn!(target: "hostkv::facade", error = %e, "Failed to remove change sink");
        }
    }
}

impl KeyValueStorage for ConfigStorage {
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

/// Backend-side sink turning partition changes into "ConfigChanged"
///
/// Holds the hub weakly, so it goes quiet once the `ConfigStorage` is
/// dropped even on backends that ignore `unwatch`.
struct ChangeForwarder {
    partition: Partition,
    notifier: Weak<SignalHub<ConfigChanged>>,
}

impl ChangeSink for ChangeForwarder {
    fn key_changed(&self, partition: Partition, key: &str) {
        if partition != self.partition {
            return;
        }
        if let Some(notifier) = self.notifier.upgrade() {
            dispatch(&notifier, key);
        }
    }
}

fn dispatch(notifier: &SignalHub<ConfigChanged>, key: &str) -> usize {
    let payload = ConfigChanged {
        key: key.to_string(),
    };
    match notifier.emit(CONFIG_CHANGED, &payload) {
        Ok(delivered) => {
            debug!(target: "hostkv::facade", key, delivered, "ConfigChanged");
            delivered
        }
        Err(e) => {
            warn!(target: "hostkv::facade", key, error = %e, "ConfigChanged not delivered");
            0
        }
    }
}
