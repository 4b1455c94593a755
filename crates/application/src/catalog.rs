//! Saved-Request Catalog
//!
//! Snapshots grouped by name, read through from the persistent store on
//! every call so that several views of the catalog never drift apart.
//! Mutations are serialized so concurrent saves never drop each other.

use std::sync::Arc;

use parking_lot::Mutex;
use restlab_domain::{GroupTarget, RequestSnapshot, SaveOutcome, SavedGroups};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{KeyValueStore, keys, read_json};

/// Catalog of saved request snapshots.
pub struct SavedRequestCatalog<S: KeyValueStore> {
    store: Arc<S>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> SavedRequestCatalog<S> {
    /// Creates a catalog over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns all groups in insertion order.
    ///
    /// Missing or corrupt data reads as an empty catalog.
    #[must_use]
    pub fn list_groups(&self) -> SavedGroups {
        read_json(self.store.as_ref(), keys::SAVED_GROUPS).unwrap_or_default()
    }

    /// Returns the snapshot at `index` in `group`.
    #[must_use]
    pub fn get(&self, group: &str, index: usize) -> Option<RequestSnapshot> {
        self.list_groups()
            .group(group)
            .and_then(|list| list.get(index))
            .cloned()
    }

    /// Saves a snapshot into the target group.
    ///
    /// A blank group name falls back to `default`. When an equal snapshot
    /// already exists in that group nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn save(
        &self,
        target: &GroupTarget,
        snapshot: RequestSnapshot,
    ) -> ApplicationResult<SaveOutcome> {
        let group = target.resolve();
        let _guard = self.write_lock.lock();
        let mut groups = self.list_groups();
        let outcome = groups.insert(&group, snapshot);
        if outcome.is_saved() {
            self.write(&groups)?;
            tracing::info!(group = %group, "saved request");
        } else {
            tracing::debug!(group = %group, "request already saved");
        }
        Ok(outcome)
    }

    /// Removes the snapshot at `index` in `group`.
    ///
    /// A group left empty is deleted. The catalog is written back even when
    /// nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn remove(&self, group: &str, index: usize) -> ApplicationResult<Option<RequestSnapshot>> {
        let _guard = self.write_lock.lock();
        let mut groups = self.list_groups();
        let removed = groups.remove(group, index);
        self.write(&groups)?;
        tracing::debug!(group, index, removed = removed.is_some(), "removed saved request");
        Ok(removed)
    }

    /// Returns true if any group holds a snapshot equal to `snapshot`.
    #[must_use]
    pub fn is_saved(&self, snapshot: &RequestSnapshot) -> bool {
        self.list_groups().contains(snapshot)
    }

    fn write(&self, groups: &SavedGroups) -> ApplicationResult<()> {
        let json = serde_json::to_string(groups)
            .map_err(|e| ApplicationError::Serialization(e.to_string()))?;
        self.store.set(keys::SAVED_GROUPS, &json)?;
        Ok(())
    }
}
