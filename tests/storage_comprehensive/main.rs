//! Storage Comprehensive Test Suite
//!
//! End-to-end coverage of the public `hostkv` surface over `MemoryBackend`.
//!
//! ## Modules
//!
//! - `facade_ops`: set_default / has_key / get / set through both facades
//! - `config_signals`: "ConfigChanged" delivery, ordering, unsubscription
//! - `settings_files`: `hostkv.toml` startup defaults and limits
//! - `concurrency`: shared facades under multiple threads
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test storage_comprehensive
//! cargo test --test storage_comprehensive config_signals::
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

use hostkv::{ConfigChanged, MemoryBackend, Storages};

pub mod concurrency;
pub mod config_signals;
pub mod facade_ops;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Fresh backend plus the facades bound to it
pub fn quick_setup() -> (Arc<MemoryBackend>, Storages) {
    let backend = Arc::new(MemoryBackend::new());
    let storages = Storages::connect(backend.clone()).expect("Failed to connect facades");
    (backend, storages)
}

/// Listener that records `tag:key` for every delivery
pub fn recording_listener(
    tag: &'static str,
    log: &Arc<Mutex<Vec<String>>>,
) -> impl Fn(&ConfigChanged) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |change: &ConfigChanged| log.lock().push(format!("{}:{}", tag, change.key))
}
