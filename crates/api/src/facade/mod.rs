//! Storage facades
//!
//! A facade is a stateless accessor bound to one backend partition. Every
//! facade call desugars to exactly one backend call with the facade's
//! partition filled in. No caching, no validation, no error translation.
//!
//! ## Desugaring
//!
//! | Facade Call | Backend Equivalent |
//! |-------------|--------------------|
//! | `set_default(key, value)` | `set_default_value(partition, key, value)` |
//! | `has_key(key)` | `has_key(partition, key)` |
//! | `get(key)` | `get_value(partition, key)` |
//! | `set(key, value)` | `set_value(partition, key, value)` |
//!
//! ## Module Structure
//!
//! - `kv`: `KeyValueFacade`, the facade over an arbitrary partition
//! - `config`: `ConfigStorage`, partition 0 with the "ConfigChanged" signal
//! - `session`: `SessionStorage`, partition 1

pub mod config;
pub mod kv;
pub mod session;

pub use config::{ConfigChanged, ConfigStorage, CONFIG_CHANGED};
pub use kv::KeyValueFacade;
pub use session::SessionStorage;

use hostkv_core::{Partition, StorageResult, Value};

/// Key-value operations against one backend partition
///
/// Implemented by [`KeyValueFacade`], [`ConfigStorage`] and
/// [`SessionStorage`]. Backend errors propagate unchanged.
///
/// ## Example
///
/// ```
/// use hostkv_api::{KeyValueStorage, Storages};
/// use hostkv_core::Value;
///
/// let storages = Storages::in_memory()?;
/// let config: &dyn KeyValueStorage = &**storages.config();
///
/// config.set_default("volume", Value::Int(80))?;
/// assert_eq!(config.get("volume")?, Some(Value::Int(80)));
///
/// config.set("volume", Value::Int(50))?;
/// assert_eq!(config.get("volume")?, Some(Value::Int(50)));
/// # Ok::<(), hostkv_core::StorageError>(())
/// ```
pub trait KeyValueStorage {
    /// Partition this facade is bound to
    fn partition(&self) -> Partition;

    /// Register a default for `key`
    ///
    /// Only takes effect if no default is registered yet; never overrides an
    /// explicit value.
    ///
    /// ## Desugars to
    /// ```text
    /// set_default_value(partition, key, value)
    /// ```
    fn set_default(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Whether `key` has a value or a default
    ///
    /// ## Desugars to
    /// ```text
    /// has_key(partition, key)
    /// ```
    fn has_key(&self, key: &str) -> StorageResult<bool>;

    /// Current value of `key`
    ///
    /// Returns `None` if the key has neither value nor default.
    ///
    /// ## Desugars to
    /// ```text
    /// get_value(partition, key)
    /// ```
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Store a value, overriding any previous value or default
    ///
    /// ## Desugars to
    /// ```text
    /// set_value(partition, key, value)
    /// ```
    fn set(&self, key: &str, value: Value) -> StorageResult<()>;
}
