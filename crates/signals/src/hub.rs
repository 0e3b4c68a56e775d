//! Signal hub: registry of named signals and their listeners
//!
//! ## Dispatch Contract
//!
//! - Only registered signal names accept listeners or emits
//! - `emit` calls every listener connected at the moment of the call, in
//!   connection order, on the calling thread
//! - The listener list is snapshotted and the lock released before any
//!   listener runs, so a listener may connect or disconnect during dispatch;
//!   the change is visible from the next `emit`
//! - `ListenerId`s are unique per hub and never reused

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Callback invoked with the signal payload
pub type Listener<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Most signals have a handful of listeners
type Slots<P> = SmallVec<[(ListenerId, Listener<P>); 4]>;

/// Handle returned by [`SignalHub::connect`], used to disconnect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw id value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Signal hub errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// The signal name was never registered on this hub
    #[error("Unknown signal: {0}")]
    UnknownSignal(String),
}

/// Registry of named signals carrying payloads of type `P`
pub struct SignalHub<P> {
    signals: Mutex<FxHashMap<String, Slots<P>>>,
    next_id: AtomicU64,
}

impl<P> fmt::Debug for SignalHub<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalHub")
            .field("signals", &self.signal_names())
            .finish()
    }
}

impl<P> Default for SignalHub<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SignalHub<P> {
    /// Create a hub with no registered signals
    pub fn new() -> Self {
        Self {
            signals: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a hub and register `names`
    pub fn with_signals(names: &[&str]) -> Self {
        let hub = Self::new();
        hub.register_signals(names);
        hub
    }

    /// Register signal names
    ///
    /// Registering a name that already exists keeps its listeners.
    pub fn register_signals(&self, names: &[&str]) {
        let mut signals = self.signals.lock();
        for name in names {
            signals.entry((*name).to_string()).or_default();
        }
    }

    /// Whether `name` is registered
    pub fn has_signal(&self, name: &str) -> bool {
        self.signals.lock().contains_key(name)
    }

    /// Registered signal names, sorted
    pub fn signal_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.signals.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Connect a closure to `name`
    pub fn connect<F>(&self, name: &str, listener: F) -> Result<ListenerId, SignalError>
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.connect_listener(name, Arc::new(listener))
    }

    /// Connect an already shared listener to `name`
    pub fn connect_listener(
        &self,
        name: &str,
        listener: Listener<P>,
    ) -> Result<ListenerId, SignalError> {
        let mut signals = self.signals.lock();
        let slots = signals
            .get_mut(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        slots.push((id, listener));
        Ok(id)
    }

    /// Disconnect listener `id` from `name`
    ///
    /// Returns `false` if `id` was not connected to `name`.
    pub fn disconnect(&self, name: &str, id: ListenerId) -> Result<bool, SignalError> {
        let mut signals = self.signals.lock();
        let slots = signals
            .get_mut(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        match slots.iter().position(|(slot_id, _)| *slot_id == id) {
            Some(pos) => {
                // remove, not swap_remove: dispatch order is connection order
                slots.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Disconnect every listener from `name`, returning how many were removed
    pub fn disconnect_all(&self, name: &str) -> Result<usize, SignalError> {
        let mut signals = self.signals.lock();
        let slots = signals
            .get_mut(name)
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?;
        let removed = slots.len();
        slots.clear();
        Ok(removed)
    }

    /// Number of listeners connected to `name`
    pub fn listener_count(&self, name: &str) -> Result<usize, SignalError> {
        self.signals
            .lock()
            .get(name)
            .map(|slots| slots.len())
            .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))
    }

    /// Dispatch `payload` to every listener of `name`
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, name: &str, payload: &P) -> Result<usize, SignalError> {
        let snapshot: Slots<P> = {
            let signals = self.signals.lock();
            signals
                .get(name)
                .ok_or_else(|| SignalError::UnknownSignal(name.to_string()))?
                .clone()
        };

        debug!(target: "hostkv::signals", signal = name, listeners = snapshot.len(), "emit");

        for (_, listener) in &snapshot {
            listener(payload);
        }
        Ok(snapshot.len())
    }
}
