// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for configuration resolution.
//!
//! The taxonomy separates fatal errors, which abort startup before a settings
//! snapshot exists, from degradations that are logged and replaced by a default.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Marked `#[non_exhaustive]` so new failure kinds can be added without breaking callers.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::errors::ConfigError;
///
/// fn database_uri() -> Result<String, ConfigError> {
///     Err(ConfigError::MissingRequiredSetting {
///         key: "DB_URI".to_string(),
///     })
/// }
///
/// assert!(database_uri().unwrap_err().is_fatal());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required setting has no value and no fallback.
    #[error("Required setting is missing: {key}")]
    MissingRequiredSetting {
        /// The environment key that was not set
        key: String,
    },

    /// A structured setting could not be parsed into its declared shape.
    #[error("Malformed value for setting '{key}' ({raw:?}): {reason}")]
    MalformedStructuredValue {
        /// The environment key
        key: String,
        /// The raw string as found in the source
        raw: String,
        /// Why parsing or conversion failed
        reason: String,
    },

    /// A key or word-list file could not be read.
    #[error("Unreadable key material for '{key}' at {}: {source}", .path.display())]
    UnreadableKeyMaterial {
        /// The setting that named the file
        key: String,
        /// The resolved file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A working directory could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailure {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a literal or a configuration file.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` when this error must abort startup.
    ///
    /// Malformed structured values and conversion failures are recoverable: the
    /// resolver logs them and falls back to the setting's default.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConfigError::MalformedStructuredValue { .. }
                | ConfigError::TypeConversionError { .. }
                | ConfigError::ParseError { .. }
        )
    }

    /// Returns the setting key this error is about, when there is one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::MissingRequiredSetting { key }
            | ConfigError::MalformedStructuredValue { key, .. }
            | ConfigError::UnreadableKeyMaterial { key, .. }
            | ConfigError::TypeConversionError { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
