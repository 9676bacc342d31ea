// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process startup: source stack assembly followed by resolution.

use crate::adapters::EnvVarAdapter;
use crate::domain::{PathResolver, Result, Settings};
use crate::ports::ConfigSource;
use crate::service::{ConfigurationServiceBuilder, SettingsResolver};
use std::path::PathBuf;

/// Names the dotenv file to load, relative to the project root or absolute.
pub const CONFIG_FILE_KEY: &str = "CONFIG";

const DEFAULT_DOTENV_FILE: &str = ".env";

/// Resolves the settings of this process, rooted at the crate directory.
///
/// See [`initialize_with_root`].
pub fn initialize() -> Result<Settings> {
    initialize_with_root(PathResolver::default())
}

/// Resolves the settings of this process with relative paths resolved by
/// `paths`.
///
/// Sources are the process environment and, when one can be found, a dotenv
/// file: the one named by `CONFIG`, else `<root>/.env`. Variables exported in
/// the environment win over the file. Key files are read and working
/// directories created as part of resolution; any fatal error is returned
/// before a snapshot exists.
///
/// # Examples
///
/// ```rust,no_run
/// use aliascfg::domain::PathResolver;
///
/// let settings = aliascfg::initialize_with_root(PathResolver::new("/srv/app")).unwrap();
/// assert!(!settings.email.alias_domains.is_empty());
/// ```
pub fn initialize_with_root(paths: PathResolver) -> Result<Settings> {
    let env = EnvVarAdapter::new();
    let dotenv = dotenv_path(&env, &paths);

    let builder = ConfigurationServiceBuilder::new().with_source(Box::new(env));
    let builder = match dotenv {
        Some(path) => with_dotenv(builder, path)?,
        None => builder,
    };
    let service = builder.build()?;

    let settings = SettingsResolver::new(&service, paths).resolve()?;
    tracing::info!(url = %settings.server.url, "Configuration loaded");
    Ok(settings)
}

/// The dotenv file to load, if any.
///
/// A `CONFIG` file that does not exist is reported and skipped.
fn dotenv_path(env: &EnvVarAdapter, paths: &PathResolver) -> Option<PathBuf> {
    match env.get_str(CONFIG_FILE_KEY) {
        Ok(Some(value)) if !value.is_empty() => {
            let path = paths.resolve(value.as_str());
            if path.is_file() {
                tracing::info!("Loading config file {}", path.display());
                Some(path)
            } else {
                tracing::warn!("Config file {} not found, ignoring", path.display());
                None
            }
        }
        _ => {
            let path = paths.resolve(DEFAULT_DOTENV_FILE);
            path.is_file().then_some(path)
        }
    }
}

#[cfg(feature = "dotenv")]
fn with_dotenv(
    builder: ConfigurationServiceBuilder,
    path: PathBuf,
) -> Result<ConfigurationServiceBuilder> {
    builder.with_dotenv_file(path)
}

#[cfg(not(feature = "dotenv"))]
fn with_dotenv(
    builder: ConfigurationServiceBuilder,
    path: PathBuf,
) -> Result<ConfigurationServiceBuilder> {
    tracing::warn!(
        "Ignoring {}: built without dotenv support",
        path.display()
    );
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> EnvVarAdapter {
        EnvVarAdapter::with_values(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_dotenv_path_from_config() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("prod.env"), "URL=x\n").unwrap();
        let paths = PathResolver::new(root.path());

        assert_eq!(
            dotenv_path(&env(&[("CONFIG", "prod.env")]), &paths),
            Some(root.path().join("prod.env"))
        );
    }

    #[test]
    fn test_dotenv_path_missing_config_file() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".env"), "URL=x\n").unwrap();
        let paths = PathResolver::new(root.path());

        assert_eq!(dotenv_path(&env(&[("CONFIG", "missing.env")]), &paths), None);
    }

    #[test]
    fn test_dotenv_path_default_file() {
        let root = TempDir::new().unwrap();
        let paths = PathResolver::new(root.path());
        assert_eq!(dotenv_path(&env(&[]), &paths), None);

        fs::write(root.path().join(".env"), "URL=x\n").unwrap();
        assert_eq!(dotenv_path(&env(&[]), &paths), Some(root.path().join(".env")));
    }
}
