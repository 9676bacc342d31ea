// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration service implementation.
//!
//! `DefaultConfigService` stacks several sources and answers lookups from the
//! highest-priority source holding the key.

use crate::domain::{ConfigKey, ConfigValue, ConfigurationService, Result};
use crate::ports::ConfigSource;

/// Default implementation of the configuration service.
///
/// Sources are queried in priority order (highest first) and the first value
/// found is returned. There is no cache: sources hold their data in memory
/// and resolution reads each key a handful of times at most.
///
/// # Examples
///
/// ```rust
/// use aliascfg::domain::{ConfigKey, ConfigurationService};
/// use aliascfg::service::DefaultConfigService;
///
/// # fn main() -> aliascfg::domain::Result<()> {
/// let service = DefaultConfigService::builder()
///     .with_env_vars()
///     .build()?;
///
/// let _ = service.has(&ConfigKey::from("DEBUG"));
/// # Ok(())
/// # }
/// ```
pub struct DefaultConfigService {
    /// Sources in priority order (highest first)
    sources: Vec<Box<dyn ConfigSource>>,
}

impl DefaultConfigService {
    /// Creates a service without sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Creates a new configuration service builder.
    pub fn builder() -> ConfigurationServiceBuilder {
        ConfigurationServiceBuilder::new()
    }

    /// Adds a configuration source to the service.
    ///
    /// Sources are re-sorted by priority after every addition. Among equal
    /// priorities the source added first wins.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        tracing::debug!(
            "Adding configuration source '{}' (priority {})",
            source.name(),
            source.priority()
        );
        self.sources.push(source);
        self.sort_sources();
    }

    /// Names of the sources, highest priority first.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Sorts sources by priority (highest first).
    fn sort_sources(&mut self) {
        self.sources.sort_by_key(|b| std::cmp::Reverse(b.priority()));
    }
}

impl Default for DefaultConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService for DefaultConfigService {
    fn lookup(&self, key: &ConfigKey) -> Option<ConfigValue> {
        for source in &self.sources {
            match source.get(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => continue,
                Err(e) => {
                    // Log the error but continue to next source
                    tracing::debug!(
                        "Error querying source '{}' for key '{}': {}",
                        source.name(),
                        key,
                        e
                    );
                    continue;
                }
            }
        }
        None
    }
}

/// Builder for constructing a `DefaultConfigService`.
///
/// # Examples
///
/// ```rust,no_run
/// use aliascfg::service::ConfigurationServiceBuilder;
///
/// # fn main() -> aliascfg::domain::Result<()> {
/// let service = ConfigurationServiceBuilder::new()
///     .with_env_vars()
///     .with_dotenv_file("/srv/app/.env")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationServiceBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationServiceBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds a configuration source to the builder.
    pub fn with_source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds the process environment as a configuration source.
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarAdapter;
        self.with_source(Box::new(EnvVarAdapter::new()))
    }

    /// Adds a dotenv file as a configuration source.
    #[cfg(feature = "dotenv")]
    pub fn with_dotenv_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::DotenvFileAdapter;
        let adapter = DotenvFileAdapter::from_file(path)?;
        Ok(self.with_source(Box::new(adapter)))
    }

    /// Builds the configuration service.
    pub fn build(self) -> Result<DefaultConfigService> {
        let mut service = DefaultConfigService::new();

        for source in self.sources {
            service.add_source(source);
        }

        Ok(service)
    }
}

impl Default for ConfigurationServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
