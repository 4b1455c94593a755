//! Persistent key/value store port

use serde::de::DeserializeOwned;

/// Keys the application persists under.
pub mod keys {
    /// The tab collection.
    pub const FORMS: &str = "forms";
    /// The active-tab cursor.
    pub const ACTIVE_INDEX: &str = "activeIndex";
    /// Saved request groups.
    pub const SAVED_GROUPS: &str = "savedOptionsGroups";
    /// Theme preference.
    pub const THEME: &str = "theme";
}

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error while reading or writing a key.
    #[error("IO error on key {key}: {source}")]
    Io {
        /// Key being accessed
        key: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be stored by this backend.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

/// Synchronous string-keyed storage for JSON text values.
///
/// Implementations must survive process restarts when used in production;
/// tests substitute an in-memory fake.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Stores several entries as one write.
    ///
    /// The default writes them one after another; no rollback is attempted
    /// when a later entry fails.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Reads and decodes a JSON value, treating missing or corrupt data as absent.
///
/// Corruption is logged and never propagated.
pub fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key, %error, "discarding corrupt persisted value");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted value");
            None
        }
    }
}
