// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file parser trait definition.
//!
//! File-backed sources read their whole file up front and hand the content
//! to a `ConfigParser`, which turns it into a flat `KEY -> value` map.

use crate::domain::Result;
use std::collections::HashMap;

/// A parser for configuration file content.
///
/// Keys come out exactly as the environment would name them (`EMAIL_DOMAIN`,
/// not `email.domain`), so a file can stand in for exported variables.
///
/// # Examples
///
/// ```rust
/// use aliascfg::ports::ConfigParser;
/// use aliascfg::domain::Result;
/// use std::collections::HashMap;
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), v.to_string()))
///             .collect())
///     }
/// }
///
/// let values = LineParser.parse("URL=https://app.example.com").unwrap();
/// assert_eq!(values["URL"], "https://app.example.com");
/// ```
pub trait ConfigParser {
    /// Parses file content into a flat key-value map.
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;
}
