// SPDX-License-Identifier: MIT OR Apache-2.0

//! Setting key newtype.
//!
//! Settings are addressed by their environment variable name (`EMAIL_DOMAIN`,
//! `DKIM_PRIVATE_KEY_PATH`, ...). `ConfigKey` keeps those names apart from the
//! values they resolve to.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A type-safe wrapper for setting keys.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("EMAIL_DOMAIN");
/// assert_eq!(key.as_str(), "EMAIL_DOMAIN");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
