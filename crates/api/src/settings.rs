//! Storage settings via `hostkv.toml`
//!
//! Limits for the in-memory backend and default values to register on
//! both facades at startup. Edit the file and restart to change them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use hostkv_core::{Limits, StorageError, StorageResult, Value};

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "hostkv.toml";

/// Size limits section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsSettings {
    /// Maximum key length in bytes
    #[serde(default = "default_max_key_bytes")]
    pub max_key_bytes: usize,
    /// Maximum string value length in bytes
    #[serde(default = "default_max_string_bytes")]
    pub max_string_bytes: usize,
}

fn default_max_key_bytes() -> usize {
    Limits::default().max_key_bytes
}

fn default_max_string_bytes() -> usize {
    Limits::default().max_string_bytes
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_key_bytes: default_max_key_bytes(),
            max_string_bytes: default_max_string_bytes(),
        }
    }
}

impl From<&LimitsSettings> for Limits {
    fn from(s: &LimitsSettings) -> Self {
        Limits {
            max_key_bytes: s.max_key_bytes,
            max_string_bytes: s.max_string_bytes,
        }
    }
}

/// Default values registered at startup, per facade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSettings {
    /// Defaults for the configuration facade
    #[serde(default)]
    pub config: BTreeMap<String, toml::Value>,
    /// Defaults for the session facade
    #[serde(default)]
    pub session: BTreeMap<String, toml::Value>,
}

/// Storage settings loaded from `hostkv.toml`.
///
/// # Example
///
/// ```toml
/// [limits]
/// max_key_bytes = 1024
/// max_string_bytes = 1048576
///
/// [defaults.config]
/// volume = 80
/// theme = "dark"
///
/// [defaults.session]
/// muted = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Limits for the in-memory backend
    #[serde(default)]
    pub limits: LimitsSettings,
    /// Defaults registered at startup
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

impl StorageSettings {
    /// Limits as the core type
    pub fn limits(&self) -> Limits {
        Limits::from(&self.limits)
    }

    /// Configuration defaults converted to values, in key order
    pub fn config_defaults(&self) -> StorageResult<Vec<(String, Value)>> {
        convert_table("defaults.config", &self.defaults.config)
    }

    /// Session defaults converted to values, in key order
    pub fn session_defaults(&self) -> StorageResult<Vec<(String, Value)>> {
        convert_table("defaults.session", &self.defaults.session)
    }

    /// Check limits and default values
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero limits or for defaults that
    /// are not scalars.
    pub fn validate(&self) -> StorageResult<()> {
        if self.limits.max_key_bytes == 0 {
            return Err(StorageError::config("limits.max_key_bytes must be greater than 0"));
        }
        if self.limits.max_string_bytes == 0 {
            return Err(StorageError::config(
                "limits.max_string_bytes must be greater than 0",
            ));
        }
        self.config_defaults()?;
        self.session_defaults()?;
        Ok(())
    }

    /// Returns the default settings file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# hostkv storage settings
#
# Limits enforced by the in-memory backend.
[limits]
max_key_bytes = 1024
max_string_bytes = 1048576

# Defaults registered on the configuration facade at startup.
# Only scalars are accepted: integers, floats, booleans and strings.
[defaults.config]
# volume = 80

# Defaults registered on the session facade at startup.
[defaults.session]
"#
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> StorageResult<Self> {
        let settings: StorageSettings = toml::from_str(content)
            .map_err(|e| StorageError::config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> StorageResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorageError::config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            StorageError::Config(msg) => {
                StorageError::config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default settings file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> StorageResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize these settings to TOML and write them to the given path.
    pub fn write_to_file(&self, path: &Path) -> StorageResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StorageError::config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn convert_table(
    section: &str,
    table: &BTreeMap<String, toml::Value>,
) -> StorageResult<Vec<(String, Value)>> {
    table
        .iter()
        .map(|(key, raw)| Ok((key.clone(), toml_to_value(section, key, raw)?)))
        .collect()
}

fn toml_to_value(section: &str, key: &str, raw: &toml::Value) -> StorageResult<Value> {
    match raw {
        toml::Value::String(s) => Ok(Value::String(s.clone())),
        toml::Value::Integer(i) => Ok(Value::Int(*i)),
        toml::Value::Float(f) => Ok(Value::Float(*f)),
        toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
        other => Err(StorageError::config(format!(
            "{}.{}: expected a scalar, found {}",
            section,
            key,
            other.type_str()
        ))),
    }
}
