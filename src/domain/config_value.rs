// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw setting value with scalar conversions.
//!
//! Sources hand back every value as the string they found it as. `ConfigValue`
//! keeps that string and offers the scalar conversions the resolver needs;
//! structured values go through [`crate::domain::literal`] instead.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw configuration value as read from a source.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("2525");
/// assert_eq!(value.as_i64("POSTFIX_PORT").unwrap(), 2525);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into a `String`.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Returns `true` for the empty string.
    ///
    /// An empty value is treated like an absent one by every accessor except
    /// presence-only flags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the value to an `i64`, ignoring surrounding whitespace.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.0
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u16`, for port numbers.
    pub fn as_u16(&self, key: &str) -> Result<u16> {
        self.0
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`, ignoring surrounding whitespace.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_as_str() {
        let value = ConfigValue::from("eu-west-3");
        assert_eq!(value.as_str(), "eu-west-3");
        assert_eq!(value.as_string(), "eu-west-3");
        assert_eq!(format!("{}", value), "eu-west-3");
    }

    #[test]
    fn test_is_empty() {
        assert!(ConfigValue::from("").is_empty());
        assert!(!ConfigValue::from(" ").is_empty());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(ConfigValue::from("5").as_i64("K").unwrap(), 5);
        assert_eq!(ConfigValue::from(" -1 ").as_i64("K").unwrap(), -1);
    }

    #[test]
    fn test_as_i64_invalid() {
        let err = ConfigValue::from("five").as_i64("MAX_NB_EMAIL_FREE_PLAN").unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversionError { .. }));
        assert_eq!(err.key(), Some("MAX_NB_EMAIL_FREE_PLAN"));
    }

    #[test]
    fn test_as_u16() {
        assert_eq!(ConfigValue::from("587").as_u16("POSTFIX_PORT").unwrap(), 587);
        assert!(ConfigValue::from("70000").as_u16("POSTFIX_PORT").is_err());
        assert!(ConfigValue::from("-25").as_u16("POSTFIX_PORT").is_err());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(ConfigValue::from("5.5").as_f64("K").unwrap(), 5.5);
        assert_eq!(ConfigValue::from("5").as_f64("K").unwrap(), 5.0);
        assert!(ConfigValue::from("lots").as_f64("K").is_err());
    }

    #[test]
    fn test_string_from_config_value() {
        let s: String = ConfigValue::from("x").into();
        assert_eq!(s, "x");
    }
}
