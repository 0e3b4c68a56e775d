//! Public API layer for hostkv
//!
//! This crate exposes the host's key-value storage to plugin code:
//! - **Facades**: stateless accessors bound to one backend partition
//! - **ConfigStorage**: partition 0, with the "ConfigChanged" signal
//! - **SessionStorage**: partition 1
//! - **Storages**: the config/session pair, built once and injected
//! - **StorageSettings**: `hostkv.toml` limits and startup defaults
//!
//! ## Architectural Invariant
//!
//! Every facade call **desugars to exactly one backend call**.
//! No caching, no validation, no error translation.
//!
//! ## Quick Start
//!
//! ```
//! use hostkv_api::{KeyValueStorage, Storages};
//! use hostkv_core::Value;
//!
//! let storages = Storages::in_memory().unwrap();
//! let config = storages.config();
//!
//! config.set_default("volume", Value::Int(80)).unwrap();
//! config.set("volume", Value::Int(50)).unwrap();
//! assert_eq!(config.get("volume").unwrap(), Some(Value::Int(50)));
//! assert!(!storages.session().has_key("volume").unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod facade;
pub mod settings;
pub mod storages;

pub use facade::{
    ConfigChanged, ConfigStorage, KeyValueFacade, KeyValueStorage, SessionStorage, CONFIG_CHANGED,
};
pub use hostkv_signals::{ListenerId, SignalError};
pub use settings::{DefaultsSettings, LimitsSettings, StorageSettings, SETTINGS_FILE_NAME};
pub use storages::Storages;
