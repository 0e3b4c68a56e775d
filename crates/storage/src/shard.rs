//! Per-partition storage
//!
//! A shard keeps defaults and explicit values in separate maps. Reads
//! resolve explicit value first, then default. Removing an explicit value
//! reveals the default again.
//!
//! Change detection compares floats bit for bit, unlike `Value`'s IEEE
//! equality: `NaN` over the same `NaN` is no change, `-0.0` over `0.0` is.

use hostkv_core::Value;
use rustc_hash::FxHashMap;

/// Defaults and explicit values of one partition
#[derive(Debug, Clone, Default)]
pub struct Shard {
    defaults: FxHashMap<String, Value>,
    values: FxHashMap<String, Value>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective value: explicit, else default
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).or_else(|| self.defaults.get(key))
    }

    /// Whether the key has an explicit value or a default
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key) || self.defaults.contains_key(key)
    }

    /// Register a default; the first one wins
    ///
    /// Returns `false` if a default was already present.
    pub fn set_default(&mut self, key: &str, value: Value) -> bool {
        if self.defaults.contains_key(key) {
            return false;
        }
        self.defaults.insert(key.to_string(), value);
        true
    }

    /// Default registered for the key, ignoring explicit values
    pub fn default_for(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    /// Store an explicit value
    ///
    /// Returns `true` if the effective value changed.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        let changed = !matches!(self.get(key), Some(current) if same_value(current, &value));
        self.values.insert(key.to_string(), value);
        changed
    }

    /// Drop the explicit value, revealing the default
    ///
    /// Returns `(existed, effective_value_changed)`.
    pub fn remove(&mut self, key: &str) -> (bool, bool) {
        match self.values.remove(key) {
            Some(old) => {
                let changed = !matches!(self.defaults.get(key), Some(d) if same_value(d, &old));
                (true, changed)
            }
            None => (false, false),
        }
    }

    /// All keys with a value or a default, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .values
            .keys()
            .chain(self.defaults.keys().filter(|k| !self.values.contains_key(*k)))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
            + self
                .defaults
                .keys()
                .filter(|k| !self.values.contains_key(*k))
                .count()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.defaults.is_empty()
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}
