// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! `ConfigurationService` is the raw lookup interface the resolver reads
//! through. It aggregates the configured sources and answers three questions
//! about a key: is it present, what is its raw value, and is it set to
//! something non-empty.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};

/// Raw key lookup across all configured sources.
///
/// Only [`lookup`](Self::lookup) must be implemented; the other methods derive
/// from it.
///
/// # Examples
///
/// ```rust
/// use aliascfg::domain::{ConfigKey, ConfigValue, ConfigurationService};
///
/// struct Fixed;
///
/// impl ConfigurationService for Fixed {
///     fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
///         (key.as_str() == "EMAIL_DOMAIN").then(|| ConfigValue::from("example.com"))
///     }
/// }
///
/// let service = Fixed;
/// assert!(service.has(&ConfigKey::from("EMAIL_DOMAIN")));
/// assert!(service.get(&ConfigKey::from("URL")).is_err());
/// ```
pub trait ConfigurationService {
    /// Returns the raw value of `key` from the highest-priority source that has
    /// it, including empty values.
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue>;

    /// Returns a non-empty value, or `MissingRequiredSetting`.
    fn get(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.lookup(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingRequiredSetting {
                key: key.as_str().to_string(),
            })
    }

    /// Returns the value, or `default` when the key is absent or empty.
    fn get_or_default(&self, key: &ConfigKey, default: &str) -> ConfigValue {
        self.get(key).unwrap_or_else(|_| ConfigValue::from(default))
    }

    /// Returns `true` when the key is present, whatever its value.
    fn has(&self, key: &ConfigKey) -> bool {
        self.lookup(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapService(HashMap<String, String>);

    impl ConfigurationService for MapService {
        fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
            self.0.get(key.as_str()).map(|v| ConfigValue::from(v.as_str()))
        }
    }

    fn service() -> MapService {
        let mut values = HashMap::new();
        values.insert("URL".to_string(), "https://app.example.com".to_string());
        values.insert("RESET_DB".to_string(), String::new());
        MapService(values)
    }

    #[test]
    fn test_get_present() {
        let value = service().get(&ConfigKey::from("URL")).unwrap();
        assert_eq!(value.as_str(), "https://app.example.com");
    }

    #[test]
    fn test_get_missing_names_key() {
        let err = service().get(&ConfigKey::from("DB_URI")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequiredSetting { ref key } if key == "DB_URI"
        ));
    }

    #[test]
    fn test_get_empty_is_missing() {
        assert!(service().get(&ConfigKey::from("RESET_DB")).is_err());
    }

    #[test]
    fn test_get_or_default() {
        let value = service().get_or_default(&ConfigKey::from("AWS_REGION"), "eu-west-3");
        assert_eq!(value.as_str(), "eu-west-3");
    }

    #[test]
    fn test_has_counts_empty_values() {
        let service = service();
        assert!(service.has(&ConfigKey::from("RESET_DB")));
        assert!(!service.has(&ConfigKey::from("COLOR_LOG")));
    }
}
