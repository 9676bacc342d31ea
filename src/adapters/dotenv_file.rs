// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dotenv file configuration source adapter.
//!
//! A dotenv file holds `KEY=VALUE` lines that stand in for exported
//! environment variables during local development and in containers.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for dotenv files (1MB)
const MAX_DOTENV_FILE_SIZE: u64 = 1024 * 1024;

const SOURCE_NAME: &str = "dotenv";

/// Dotenv parser implementation backed by `dotenvy`.
///
/// Supports comments, `export` prefixes, single/double quoting and `${VAR}`
/// substitution from earlier lines. Unquoted values may contain spaces
/// (`SUPPORT_NAME=Support Team`); they are trimmed and a trailing ` # note`
/// is dropped.
///
/// # Examples
///
/// ```rust
/// use aliascfg::adapters::DotenvParser;
/// use aliascfg::ports::ConfigParser;
///
/// let content = "# mail\nEMAIL_DOMAIN=example.com\nSUPPORT_NAME=Support Team\n";
/// let values = DotenvParser::new().parse(content).unwrap();
/// assert_eq!(values["EMAIL_DOMAIN"], "example.com");
/// assert_eq!(values["SUPPORT_NAME"], "Support Team");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotenvParser;

impl DotenvParser {
    /// Creates a new dotenv parser.
    pub fn new() -> Self {
        DotenvParser
    }
}

impl ConfigParser for DotenvParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let content = quote_bare_values(content);
        let mut result = HashMap::new();
        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (key, value) = item.map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse dotenv content: {}", e),
                source: Some(Box::new(e)),
            })?;
            result.insert(key, value);
        }
        Ok(result)
    }
}

/// Wraps unquoted values holding inner whitespace in single quotes.
///
/// `dotenvy` follows shell rules and rejects `KEY=two words`. Lines that sit
/// inside a multi-line quoted value are copied unchanged.
fn quote_bare_values(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut open: Option<char> = None;
    for line in content.split_inclusive('\n') {
        match open.is_none().then(|| quote_bare_line(line)).flatten() {
            Some(rewritten) => out.push_str(&rewritten),
            None => {
                open = quote_state(line, open);
                out.push_str(line);
            }
        }
    }
    out
}

fn quote_bare_line(line: &str) -> Option<String> {
    let body = line.trim_end_matches(['\r', '\n']);
    let eol = &line[body.len()..];
    let trimmed = body.trim_start();
    let (export, rest) = match trimmed.strip_prefix("export ") {
        Some(rest) => ("export ", rest.trim_start()),
        None => ("", trimmed),
    };

    let (key, value) = rest.split_once('=')?;
    let key = key.trim_end();
    let valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.'));
    if !valid_key {
        return None;
    }

    let value = strip_inline_comment(value.trim());
    if !value.contains(char::is_whitespace) || value.contains(['\'', '"', '\\', '$']) {
        return None;
    }
    Some(format!("{export}{key}='{value}'{eol}"))
}

/// Drops a `#` comment that follows whitespace.
fn strip_inline_comment(value: &str) -> &str {
    let mut prev_blank = false;
    for (i, ch) in value.char_indices() {
        if ch == '#' && prev_blank {
            return value[..i].trim_end();
        }
        prev_blank = ch.is_whitespace();
    }
    value
}

/// Quote still open at the end of `line`, given the one open at its start.
fn quote_state(line: &str, mut open: Option<char>) -> Option<char> {
    let mut chars = line.chars();
    let mut prev_blank = true;
    while let Some(ch) = chars.next() {
        match (open, ch) {
            (_, '\\') => {
                chars.next();
            }
            (Some(q), ch) if ch == q => open = None,
            (None, '#') if prev_blank => break,
            (None, '\'' | '"') => open = Some(ch),
            _ => {}
        }
        prev_blank = ch.is_whitespace();
    }
    open
}

/// Configuration source adapter for a dotenv file.
///
/// # Priority
///
/// Dotenv files have a priority of 1: any variable also exported in the
/// process environment (priority 2) wins over the file.
///
/// # Examples
///
/// ```rust,no_run
/// use aliascfg::adapters::DotenvFileAdapter;
///
/// let adapter = DotenvFileAdapter::from_file("/srv/app/.env").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotenvFileAdapter {
    /// Canonical path of the file
    file_path: PathBuf,
    /// Parsed values
    values: HashMap<String, String>,
}

impl DotenvFileAdapter {
    /// Reads and parses the dotenv file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref();
        let display_name = || {
            file_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("<unknown>")
                .to_string()
        };

        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name()),
            source: Some(Box::new(e)),
        })?;

        // Check file size before reading
        let metadata = fs::metadata(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Failed to read file metadata: {}", display_name()),
            source: Some(Box::new(e)),
        })?;

        if metadata.len() > MAX_DOTENV_FILE_SIZE {
            return Err(ConfigError::SourceError {
                source_name: SOURCE_NAME.to_string(),
                message: format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_DOTENV_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&canonical_path).map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Failed to read configuration file: {}", display_name()),
            source: Some(Box::new(e)),
        })?;

        let values = DotenvParser::new().parse(&content)?;
        tracing::debug!(
            "Loaded {} values from dotenv file {}",
            values.len(),
            canonical_path.display()
        );

        Ok(Self {
            file_path: canonical_path,
            values,
        })
    }

    /// Returns the canonical path of the loaded file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for DotenvFileAdapter {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .get(key.as_str())
            .map(|v| ConfigValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
