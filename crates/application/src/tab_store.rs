//! Tab Store: the ordered tab collection and its active cursor.
//!
//! Every mutation writes the whole collection and the cursor through to the
//! persistent store in a single `set_many` call. Persist failures are logged
//! and never surface to the caller.

use std::sync::Arc;

use restlab_domain::response::ResponseEnvelope;
use restlab_domain::{RequestSnapshot, Tab, TabEdit, TabId};

use crate::ports::{KeyValueStore, keys, read_json};

/// Ordered collection of tabs with an active cursor.
///
/// Invariants: the collection is never empty and the cursor always indexes
/// a tab.
pub struct TabStore<S: KeyValueStore> {
    store: Arc<S>,
    tabs: Vec<Tab>,
    active: usize,
}

impl<S: KeyValueStore> TabStore<S> {
    /// Loads the persisted tabs, falling back to one default tab.
    ///
    /// Missing, corrupt or empty data yields a single fresh tab with the
    /// cursor at 0. Busy flags are cleared since nothing can be in flight
    /// after a reload.
    pub fn load(store: Arc<S>) -> Self {
        let mut tabs: Vec<Tab> = read_json(store.as_ref(), keys::FORMS)
            .filter(|tabs: &Vec<Tab>| !tabs.is_empty())
            .unwrap_or_else(|| vec![Tab::new()]);
        for tab in &mut tabs {
            tab.busy = false;
        }

        let stored_active: usize = read_json(store.as_ref(), keys::ACTIVE_INDEX).unwrap_or(0);
        let active = stored_active.min(tabs.len() - 1);
        if active != stored_active {
            tracing::warn!(stored_active, active, "clamped persisted active tab index");
        }

        tracing::debug!(count = tabs.len(), active, "loaded tabs");
        Self {
            store,
            tabs,
            active,
        }
    }

    /// Returns all tabs in order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the number of tabs (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns the active cursor.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    /// Returns the tab at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Returns the tab with the given id.
    #[must_use]
    pub fn find(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    /// Resolves the current position of a tab id.
    #[must_use]
    pub fn index_of(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| &tab.id == id)
    }

    /// Appends a default tab and makes it active.
    pub fn create(&mut self) -> TabId {
        self.push_active(Tab::new())
    }

    /// Appends a tab seeded from a saved snapshot and makes it active.
    pub fn from_snapshot(&mut self, snapshot: &RequestSnapshot) -> TabId {
        self.push_active(Tab::from_snapshot(snapshot))
    }

    /// Removes the tab at `index`.
    ///
    /// Refused when it is the last remaining tab or the index is out of
    /// range. Returns whether a tab was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.tabs.len() <= 1 || index >= self.tabs.len() {
            tracing::debug!(index, count = self.tabs.len(), "tab removal refused");
            return false;
        }
        let removed = self.tabs.remove(index);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        tracing::debug!(id = %removed.id, index, "removed tab");
        self.persist();
        true
    }

    /// Applies a single-field edit to the tab at `index`.
    ///
    /// Returns false, without writing, when the index is out of range.
    pub fn update(&mut self, index: usize, edit: TabEdit) -> bool {
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        tracing::trace!(id = %tab.id, field = edit.field_name(), "updating tab");
        tab.apply(edit);
        self.persist();
        true
    }

    /// Applies a single-field edit to the tab with the given id.
    ///
    /// The position is resolved at mutation time, so an edit for a tab
    /// that has been removed is dropped instead of landing on a neighbour.
    pub fn update_by_id(&mut self, id: &TabId, edit: TabEdit) -> bool {
        match self.index_of(id) {
            Some(index) => self.update(index, edit),
            None => {
                tracing::debug!(%id, field = edit.field_name(), "dropping edit for unknown tab");
                false
            }
        }
    }

    /// Moves the active cursor. Out-of-range indexes are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        self.persist();
        true
    }

    /// Stores a dispatch result and clears the busy flag in one mutation.
    ///
    /// Returns false when the tab no longer exists; the envelope is then
    /// discarded.
    pub fn complete_dispatch(&mut self, id: &TabId, envelope: ResponseEnvelope) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|tab| &tab.id == id) else {
            tracing::debug!(%id, "discarding response for removed tab");
            return false;
        };
        tab.apply(TabEdit::Response(Some(envelope)));
        tab.apply(TabEdit::Busy(false));
        self.persist();
        true
    }

    fn push_active(&mut self, tab: Tab) -> TabId {
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        tracing::debug!(%id, index = self.active, "created tab");
        self.persist();
        id
    }

    fn persist(&self) {
        let forms = match serde_json::to_string(&self.tabs) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to encode tabs; skipping persist");
                return;
            }
        };
        let entries = [
            (keys::FORMS, forms),
            (keys::ACTIVE_INDEX, self.active.to_string()),
        ];
        if let Err(error) = self.store.set_many(&entries) {
            tracing::warn!(%error, "failed to persist tabs");
        }
    }
}
