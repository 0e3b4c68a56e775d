//! hostkv - key-value storage facades for host-embedded plugin code
//!
//! A host application owns a key-value store split into partitions:
//! partition 0 holds persistent configuration, partition 1 holds session
//! data. hostkv exposes them to plugin code as two facades, `config` and
//! `session`, plus a "ConfigChanged" signal on the configuration facade.
//!
//! # Quick Start
//!
//! ```
//! use hostkv::{KeyValueStorage, Storages, Value};
//!
//! let storages = Storages::in_memory()?;
//! let config = storages.config();
//!
//! config.on_config_changed(|change| println!("{} changed", change.key)).unwrap();
//! config.set_default("volume", Value::Int(80))?;
//! config.set("volume", Value::Int(50))?;
//!
//! assert_eq!(config.get("volume")?, Some(Value::Int(50)));
//! assert!(!storages.session().has_key("volume")?);
//! # Ok::<(), hostkv::StorageError>(())
//! ```
//!
//! # Architecture
//!
//! - `hostkv-core`: values, partitions, errors, the `Backend` trait
//! - `hostkv-signals`: named signals with ordered synchronous dispatch
//! - `hostkv-storage`: `MemoryBackend`, the in-memory reference backend
//! - `hostkv-api`: facades, the `Storages` bundle, `hostkv.toml` settings
//!
//! Hosts plug their own storage in by implementing [`Backend`].

pub use hostkv_api::*;
pub use hostkv_core::{
    Backend, ChangeSink, KeyError, LimitError, Limits, Partition, StorageError, StorageResult,
    Value,
};
pub use hostkv_signals::SignalHub;
pub use hostkv_storage::MemoryBackend;
