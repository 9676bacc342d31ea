// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.

use crate::domain::{ConfigKey, ConfigValue, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (1MB)
const MAX_ENV_VALUE_LEN: usize = 1048576;

/// Configuration source adapter for the process environment.
///
/// The environment is captured once, when the adapter is created. Keys keep
/// their exact environment spelling.
///
/// # Priority
///
/// Environment variables have a priority of 2 and override dotenv files
/// (priority 1).
///
/// # Examples
///
/// ```rust
/// use aliascfg::adapters::EnvVarAdapter;
/// use aliascfg::ports::ConfigSource;
/// use std::collections::HashMap;
///
/// // Read the whole process environment
/// let adapter = EnvVarAdapter::new();
///
/// // Or a fixed set of values
/// let mut values = HashMap::new();
/// values.insert("EMAIL_DOMAIN".to_string(), "example.com".to_string());
/// let adapter = EnvVarAdapter::with_values(values);
/// assert!(adapter.get_str("EMAIL_DOMAIN").unwrap().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarAdapter {
    /// Captured variables
    values: HashMap<String, String>,
}

impl EnvVarAdapter {
    /// Captures every environment variable of the process.
    pub fn new() -> Self {
        Self { values: load() }
    }

    /// Creates an adapter over fixed values instead of the process environment.
    ///
    /// Meant for tests and for embedding the resolver where the environment
    /// is not the source of truth.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

/// Reads the process environment, skipping oversized entries.
fn load() -> HashMap<String, String> {
    let mut values = HashMap::new();

    // vars_os so a single non-UTF-8 entry does not abort the whole read
    for (key, value) in env::vars_os() {
        let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
            tracing::debug!("Skipping non UTF-8 environment variable {:?}", key);
            continue;
        };

        if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
            tracing::debug!(
                "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                key.len(),
                value.len(),
                MAX_ENV_KEY_LEN,
                MAX_ENV_VALUE_LEN
            );
            continue;
        }

        values.insert(key.to_string(), value.to_string());
    }

    tracing::debug!("Loaded {} environment variables", values.len());

    values
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_adapter_name_and_priority() {
        let adapter = EnvVarAdapter::with_values(HashMap::new());
        assert_eq!(adapter.name(), "env");
        assert_eq!(adapter.priority(), 2);
    }

    #[test]
    fn test_env_adapter_reads_process_environment() {
        let mut guard = EnvGuard::new();
        guard.set("ALIASCFG_TEST_SUPPORT_NAME", "Support Team");

        let adapter = EnvVarAdapter::new();
        let value = adapter.get_str("ALIASCFG_TEST_SUPPORT_NAME").unwrap();
        assert_eq!(value.unwrap().as_str(), "Support Team");
    }

    #[test]
    fn test_env_adapter_keeps_key_spelling() {
        let mut guard = EnvGuard::new();
        guard.set("ALIASCFG_TEST_KEY_SPELLING", "v");

        let adapter = EnvVarAdapter::new();
        assert!(adapter.get_str("ALIASCFG_TEST_KEY_SPELLING").unwrap().is_some());
        assert!(adapter.get_str("aliascfg.test.key.spelling").unwrap().is_none());
    }

    #[test]
    fn test_env_adapter_keeps_empty_values() {
        let mut guard = EnvGuard::new();
        guard.set("ALIASCFG_TEST_EMPTY_FLAG", "");

        let adapter = EnvVarAdapter::new();
        let value = adapter.get_str("ALIASCFG_TEST_EMPTY_FLAG").unwrap();
        assert_eq!(value, Some(ConfigValue::from("")));
    }

    #[test]
    fn test_env_adapter_get_nonexistent() {
        let adapter = EnvVarAdapter::new();
        let value = adapter.get_str("ALIASCFG_TEST_NONEXISTENT_12345").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_env_adapter_with_values() {
        let mut values = HashMap::new();
        values.insert("URL".to_string(), "https://app.example.com".to_string());
        values.insert("DB_URI".to_string(), "postgres://db".to_string());

        let adapter = EnvVarAdapter::with_values(values);
        let mut keys: Vec<String> = adapter
            .all_keys()
            .unwrap()
            .into_iter()
            .map(ConfigKey::into_string)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["DB_URI".to_string(), "URL".to_string()]);
    }
}
