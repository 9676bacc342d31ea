// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project-relative path resolution.

use std::path::{Path, PathBuf};

/// Resolves setting paths against a fixed project root.
///
/// Absolute paths are kept as they are; anything else is joined onto the root.
///
/// # Examples
///
/// ```
/// use aliascfg::domain::paths::PathResolver;
/// use std::path::Path;
///
/// let paths = PathResolver::new("/srv/app");
/// assert_eq!(paths.resolve("local_data/words.txt"), Path::new("/srv/app/local_data/words.txt"));
/// assert_eq!(paths.resolve("/etc/dkim.key"), Path::new("/etc/dkim.key"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Creates a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root relative paths are joined to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `path` unchanged when it is absolute, otherwise `root/path`.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for PathResolver {
    /// Rooted at the directory holding this crate's manifest, fixed at build time.
    fn default() -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_is_joined() {
        let paths = PathResolver::new("/opt/alias");
        assert_eq!(
            paths.resolve("local_data/jwtRS256.key"),
            PathBuf::from("/opt/alias/local_data/jwtRS256.key")
        );
    }

    #[test]
    fn test_absolute_path_is_unchanged() {
        let paths = PathResolver::new("/opt/alias");
        assert_eq!(paths.resolve("/run/secrets/dkim.key"), PathBuf::from("/run/secrets/dkim.key"));
    }

    #[test]
    fn test_dot_segments_are_not_normalised() {
        let paths = PathResolver::new("/opt/alias");
        assert_eq!(paths.resolve("../keys/a.pem"), PathBuf::from("/opt/alias/../keys/a.pem"));
    }

    #[test]
    fn test_default_root_is_absolute() {
        let paths = PathResolver::default();
        assert!(paths.root().is_absolute());
        assert_eq!(paths.resolve("x"), paths.root().join("x"));
    }
}
