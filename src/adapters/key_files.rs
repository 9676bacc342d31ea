// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material and word lists read from disk at startup.

use crate::domain::{ConfigError, PathResolver, Result};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Length of the random name given to a temporary private directory.
const PRIVATE_DIR_NAME_LEN: usize = 20;

/// Upload directory, relative to the project root.
const UPLOAD_DIR: &str = "static/upload";

/// Loads key files and word lists, and prepares working directories.
///
/// Paths are resolved against the project root first. Read failures are
/// reported as [`ConfigError::UnreadableKeyMaterial`] naming the setting that
/// pointed at the file.
///
/// # Examples
///
/// ```rust,no_run
/// use aliascfg::adapters::KeyFileLoader;
/// use aliascfg::domain::PathResolver;
///
/// let loader = KeyFileLoader::new(PathResolver::new("/srv/app"));
/// let key = loader.load_text("DKIM_PRIVATE_KEY_PATH", "local_data/dkim.key").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct KeyFileLoader {
    paths: PathResolver,
}

impl KeyFileLoader {
    /// Creates a loader resolving paths with `paths`.
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }

    /// The resolver used for relative paths.
    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Reads the whole file named by setting `key`.
    pub fn load_text(&self, key: &str, path: impl AsRef<Path>) -> Result<String> {
        let path = self.paths.resolve(path);
        let content =
            fs::read_to_string(&path).map_err(|source| ConfigError::UnreadableKeyMaterial {
                key: key.to_string(),
                path: path.clone(),
                source,
            })?;
        tracing::debug!("Loaded {} from {}", key, path.display());
        Ok(content)
    }

    /// Like [`load_text`](Self::load_text), but `None` when the path setting
    /// itself was never configured.
    ///
    /// A configured path that cannot be read is still an error.
    pub fn load_optional_text(&self, key: &str, path: Option<&str>) -> Result<Option<String>> {
        match path {
            Some(path) => self.load_text(key, path).map(Some),
            None => {
                tracing::debug!("{} not set, skipping optional key", key);
                Ok(None)
            }
        }
    }

    /// Reads a newline-delimited list.
    ///
    /// Each line is trimmed and lowercased; blank lines and lines starting
    /// with `#` are dropped.
    pub fn load_lines(&self, key: &str, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let content = self.load_text(key, path)?;
        Ok(parse_lines(&content))
    }

    /// Returns the private working directory, creating a temporary one if
    /// none is configured.
    ///
    /// A configured directory is resolved and returned as-is. Otherwise a
    /// directory with a random name is created under the system temp dir,
    /// readable by the owner only.
    pub fn ensure_private_dir(&self, configured: Option<&str>) -> Result<PathBuf> {
        if let Some(dir) = configured {
            return Ok(self.paths.resolve(dir));
        }

        let dir = std::env::temp_dir().join(random_dir_name());
        create_private_dir(&dir)?;
        tracing::warn!("Using temporary directory {} for private key material", dir.display());
        Ok(dir)
    }

    /// Creates `<root>/static/upload` if needed and returns it.
    pub fn ensure_upload_dir(&self) -> Result<PathBuf> {
        let dir = self.paths.resolve(UPLOAD_DIR);
        if !dir.exists() {
            tracing::info!("Creating upload directory {}", dir.display());
            fs::create_dir_all(&dir).map_err(|source| ConfigError::DirectoryCreationFailure {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(dir)
    }
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn random_dir_name() -> String {
    let mut rng = rand::rng();
    (0..PRIVATE_DIR_NAME_LEN)
        .map(|_| rng.random_range('a'..='z'))
        .collect()
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .mode(0o700)
        .create(dir)
        .map_err(|source| ConfigError::DirectoryCreationFailure {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir(dir).map_err(|source| ConfigError::DirectoryCreationFailure {
        path: dir.to_path_buf(),
        source,
    })
}
