// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! `ConfigSource` is the port every raw key/value provider implements: the
//! process environment, a dotenv file, or a fixed map in tests.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A provider of raw setting values.
///
/// Sources are read once, during startup resolution. When several sources
/// hold the same key, the one with the higher [`priority`](Self::priority)
/// wins.
///
/// # Examples
///
/// ```rust
/// use aliascfg::domain::{ConfigKey, ConfigValue, Result};
/// use aliascfg::ports::ConfigSource;
///
/// struct Defaults;
///
/// impl ConfigSource for Defaults {
///     fn name(&self) -> &str {
///         "defaults"
///     }
///
///     fn priority(&self) -> u8 {
///         0
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         Ok((key.as_str() == "AWS_REGION").then(|| ConfigValue::from("eu-west-3")))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("AWS_REGION")])
///     }
/// }
///
/// let value = Defaults.get_str("AWS_REGION").unwrap();
/// assert_eq!(value.unwrap().as_str(), "eu-west-3");
/// ```
pub trait ConfigSource: Send + Sync {
    /// Name used in diagnostics (`"env"`, `"dotenv"`, ...).
    fn name(&self) -> &str;

    /// Precedence of this source; higher values win.
    ///
    /// The process environment uses 2 and dotenv files use 1, so a variable
    /// exported in the shell beats the same key in a file.
    fn priority(&self) -> u8;

    /// Returns the raw value of `key`, or `None` when this source lacks it.
    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns every key this source holds.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Convenience wrapper around [`get`](Self::get) taking a `&str`.
    fn get_str(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.get(&ConfigKey::from(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestSource {
        name: String,
        priority: u8,
    }

    impl ConfigSource for TestSource {
        fn name(&self) -> &str {
            &self.name
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            Ok((key.as_str() == "EMAIL_DOMAIN").then(|| ConfigValue::from("example.com")))
        }

        fn all_keys(&self) -> Result<Vec<ConfigKey>> {
            Ok(vec![ConfigKey::from("EMAIL_DOMAIN")])
        }
    }

    fn source() -> TestSource {
        TestSource {
            name: "test-source".to_string(),
            priority: 1,
        }
    }

    #[test]
    fn test_config_source_name_and_priority() {
        let source = source();
        assert_eq!(source.name(), "test-source");
        assert_eq!(source.priority(), 1);
    }

    #[test]
    fn test_config_source_get_str() {
        let source = source();
        assert_eq!(
            source.get_str("EMAIL_DOMAIN").unwrap(),
            Some(ConfigValue::from("example.com"))
        );
        assert_eq!(source.get_str("URL").unwrap(), None);
    }

    #[test]
    fn test_config_source_all_keys() {
        assert_eq!(source().all_keys().unwrap(), vec![ConfigKey::from("EMAIL_DOMAIN")]);
    }

    #[test]
    fn test_config_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn ConfigSource>>();
    }
}
