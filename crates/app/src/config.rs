//! Application configuration.

use std::path::PathBuf;

use restlab_infrastructure::FileKeyValueStore;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "RESTLAB_DATA_DIR";

/// Environment variable selecting an in-memory session that persists nothing.
pub const EPHEMERAL_ENV: &str = "RESTLAB_EPHEMERAL";

/// Error type for configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No data directory could be determined.
    #[error("Could not determine data directory; set {DATA_DIR_ENV}")]
    NoDataDir,
}

/// Where workbench state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// One file per key inside this directory
    Directory(PathBuf),
    /// Process memory only
    Memory,
}

/// Runtime configuration for the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backing store for tabs, saved requests and theme
    pub storage: Storage,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] when persistence is wanted but
    /// neither the override nor a platform data directory is available.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(EPHEMERAL_ENV).ok(),
            FileKeyValueStore::default_location(),
        )
    }

    /// Ephemeral wins, then a non-blank override, then the default location.
    fn resolve(
        override_dir: Option<String>,
        ephemeral: Option<String>,
        default_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if ephemeral.as_deref().is_some_and(is_truthy) {
            return Ok(Self {
                storage: Storage::Memory,
            });
        }

        let dir = match override_dir {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_dir.ok_or(ConfigError::NoDataDir)?,
        };
        Ok(Self {
            storage: Storage::Directory(dir),
        })
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
