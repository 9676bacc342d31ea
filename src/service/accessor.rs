// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to raw configuration values.
//!
//! `EnvAccessor` sits between the [`ConfigurationService`] and the resolver.
//! It knows the difference between presence-only switches and valued
//! settings, and how a malformed value degrades to its default.

use crate::domain::literal::parse_lenient;
use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, ConfigurationService, FromLiteral, Literal, PathResolver,
    Result,
};
use std::path::PathBuf;

/// When a parsed value gives way to the fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Use the fallback only when the key is absent, empty or unparsable.
    ///
    /// Explicit falsy values such as `0`, `""` or `[]` are kept.
    WhenAbsent,
    /// Also use the fallback when the value parses to something falsy.
    WhenFalsy,
}

/// Reads settings through a configuration service.
///
/// A key set to the empty string reads as absent everywhere except in
/// [`flag`](Self::flag), which only checks presence.
///
/// # Examples
///
/// ```rust
/// use aliascfg::adapters::EnvVarAdapter;
/// use aliascfg::service::{DefaultConfigService, EnvAccessor, FallbackPolicy};
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("PREMIUM_ALIAS_DOMAINS".to_string(), r#"["premium.com"]"#.to_string());
/// values.insert("RESET_DB".to_string(), String::new());
///
/// let service = DefaultConfigService::builder()
///     .with_source(Box::new(EnvVarAdapter::with_values(values)))
///     .build()
///     .unwrap();
/// let env = EnvAccessor::new(&service);
///
/// assert!(env.flag("RESET_DB"));
/// let domains: Vec<String> = env.structured("PREMIUM_ALIAS_DOMAINS", FallbackPolicy::WhenFalsy, Vec::new);
/// assert_eq!(domains, vec!["premium.com".to_string()]);
/// ```
#[derive(Clone, Copy)]
pub struct EnvAccessor<'a> {
    service: &'a dyn ConfigurationService,
}

impl<'a> EnvAccessor<'a> {
    /// Creates an accessor over `service`.
    pub fn new(service: &'a dyn ConfigurationService) -> Self {
        Self { service }
    }

    /// Non-empty raw value of `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.service
            .lookup(&ConfigKey::from(key))
            .filter(|value| !value.is_empty())
            .map(|value| value.as_string())
    }

    /// Presence-only switch: `true` when the key exists, even if empty.
    pub fn flag(&self, key: &str) -> bool {
        self.service.has(&ConfigKey::from(key))
    }

    /// Valued switch: `true` when the key is set to anything non-empty.
    pub fn enabled(&self, key: &str) -> bool {
        self.raw(key).is_some()
    }

    /// Value of a setting the process cannot start without.
    pub fn required(&self, key: &str) -> Result<String> {
        self.service
            .get(&ConfigKey::from(key))
            .map(|value| value.as_string())
    }

    /// Value of an optional setting.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.raw(key)
    }

    /// Value of `key`, or `default`.
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.service
            .get_or_default(&ConfigKey::from(key), default)
            .as_string()
    }

    /// Integer setting. A malformed value is logged and replaced by `default`.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.numeric_or(key, default, |value| ConfigValue::from(value).as_i64(key))
    }

    /// Port number setting. A malformed value is logged and replaced by `default`.
    pub fn port_or(&self, key: &str, default: u16) -> u16 {
        self.numeric_or(key, default, |value| ConfigValue::from(value).as_u16(key))
    }

    /// Float setting. A malformed value is logged and replaced by `default`.
    pub fn float_or(&self, key: &str, default: f64) -> f64 {
        self.numeric_or(key, default, |value| ConfigValue::from(value).as_f64(key))
    }

    fn numeric_or<T, F>(&self, key: &str, default: T, convert: F) -> T
    where
        T: Copy + std::fmt::Display,
        F: FnOnce(&str) -> Result<T>,
    {
        let Some(raw) = self.raw(key) else {
            return default;
        };
        match convert(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, raw = %raw, error = %e, "Invalid number, using default {}", default);
                default
            }
        }
    }

    /// Path setting resolved against the project root.
    pub fn path_or(&self, key: &str, default: &str, paths: &PathResolver) -> PathBuf {
        paths.resolve(self.string_or(key, default))
    }

    /// Parses `key` as a literal.
    ///
    /// An absent or empty key yields the fallback, or `MissingRequiredSetting`
    /// when there is none. A value that does not parse yields the fallback
    /// after a warning, or `MalformedStructuredValue` when there is none. A
    /// value that parses to something falsy yields the fallback under
    /// [`FallbackPolicy::WhenFalsy`].
    pub fn get<F>(&self, key: &str, fallback: Option<F>, policy: FallbackPolicy) -> Result<Literal>
    where
        F: FnOnce() -> Literal,
    {
        let Some(raw) = self.raw(key) else {
            return fallback
                .map(|f| f())
                .ok_or_else(|| ConfigError::MissingRequiredSetting {
                    key: key.to_string(),
                });
        };
        let Some(fallback) = fallback else {
            return Literal::parse(&raw).map_err(|e| malformed(key, &raw, e.to_string()));
        };

        let _setting = tracing::warn_span!("setting", key).entered();
        match parse_lenient(&raw) {
            Some(literal) if policy == FallbackPolicy::WhenAbsent || literal.is_truthy() => Ok(literal),
            Some(_) => {
                tracing::debug!("Falsy value, using fallback");
                Ok(fallback())
            }
            None => Ok(fallback()),
        }
    }

    /// Parses `key` into `T`, degrading to `default()` on any problem.
    ///
    /// Shape mismatches (a string where a list was expected, say) are logged
    /// the same way as grammar errors.
    pub fn structured<T, D>(&self, key: &str, policy: FallbackPolicy, default: D) -> T
    where
        T: FromLiteral,
        D: FnOnce() -> T,
    {
        let Some(raw) = self.raw(key) else {
            return default();
        };

        let _setting = tracing::warn_span!("setting", key).entered();
        let Some(literal) = parse_lenient(&raw) else {
            return default();
        };
        if policy == FallbackPolicy::WhenFalsy && !literal.is_truthy() {
            return default();
        }

        let kind = literal.kind();
        T::from_literal(literal).unwrap_or_else(|| {
            tracing::warn!(
                raw = %raw,
                "Using default for malformed setting: expected {}, found {}",
                T::expected(),
                kind
            );
            default()
        })
    }

    /// Parses `key` into `T` for a setting without any default.
    pub fn require_structured<T: FromLiteral>(&self, key: &str) -> Result<T> {
        let raw = self.required(key)?;
        let literal = Literal::parse(&raw).map_err(|e| malformed(key, &raw, e.to_string()))?;
        let kind = literal.kind();
        T::from_literal(literal)
            .ok_or_else(|| malformed(key, &raw, format!("expected {}, found {}", T::expected(), kind)))
    }
}

fn malformed(key: &str, raw: &str, reason: String) -> ConfigError {
    ConfigError::MalformedStructuredValue {
        key: key.to_string(),
        raw: raw.to_string(),
        reason,
    }
}
