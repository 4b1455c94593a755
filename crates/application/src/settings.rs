//! Theme preference persistence.

use std::sync::Arc;

use restlab_domain::ThemeMode;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{KeyValueStore, keys};

/// Reads and writes the persisted theme.
pub struct ThemeSettings<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> ThemeSettings<S> {
    /// Creates theme settings over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the stored theme, or the default when missing or corrupt.
    ///
    /// Accepts both JSON text (`"light"`) and a bare name (`light`).
    #[must_use]
    pub fn load(&self) -> ThemeMode {
        let raw = match self.store.get(keys::THEME) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ThemeMode::default(),
            Err(error) => {
                tracing::warn!(%error, "failed to read theme");
                return ThemeMode::default();
            }
        };

        serde_json::from_str::<ThemeMode>(&raw)
            .ok()
            .or_else(|| raw.parse().ok())
            .unwrap_or_else(|| {
                tracing::warn!(raw = %raw, "discarding unknown theme");
                ThemeMode::default()
            })
    }

    /// Persists a theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set(&self, theme: ThemeMode) -> ApplicationResult<()> {
        let json = serde_json::to_string(&theme)
            .map_err(|e| ApplicationError::Serialization(e.to_string()))?;
        self.store.set(keys::THEME, &json)?;
        Ok(())
    }

    /// Switches between light and dark and returns the new theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn toggle(&self) -> ApplicationResult<ThemeMode> {
        let theme = self.load().toggled();
        self.set(theme)?;
        Ok(theme)
    }
}
