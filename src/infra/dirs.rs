//! Platform-specific directory management
//!
//! Resolves the config directory holding the user's default job template.
//! Follows the XDG Base Directory Specification on Linux and standard
//! locations on macOS.
//!
//! The `DAGCI_CONFIG_DIR` environment variable overrides the default.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::TEMPLATE_FILE_NAME;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "DAGCI_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "dagci";

/// Platform-specific directory provider for dagci
#[derive(Debug, Clone)]
pub struct DagciDirs {
    config_dir: PathBuf,
}

impl DagciDirs {
    /// Create a new `DagciDirs` instance
    ///
    /// Checks the environment variable first, then falls back to the
    /// platform default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Use an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/dagci` or `~/.config/dagci`
    /// - macOS: `~/Library/Application Support/dagci`
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the user's default job template
    #[must_use]
    pub fn template_path(&self) -> PathBuf {
        self.config_dir.join(TEMPLATE_FILE_NAME)
    }

    /// Resolve config directory from environment or platform default
    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for DagciDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_new_creates_instance() {
        let dirs = DagciDirs::new();
        assert!(!dirs.config_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_template_path_is_under_config_dir() {
        let dirs = DagciDirs::with_config_dir("/etc/dagci");
        assert_eq!(dirs.template_path(), PathBuf::from("/etc/dagci/template.toml"));
    }
}
