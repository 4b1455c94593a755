//! Saved requests, grouped by a user-chosen name.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::request::{BodyMode, FormField, HttpMethod};

/// Group used when the user leaves the group name blank.
pub const DEFAULT_GROUP: &str = "default";

/// Frozen copy of a tab's request-defining fields.
///
/// Responses, busy flags, bearer tokens and file bindings are not part of
/// a snapshot. Two snapshots are duplicates when they are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnapshot {
    /// Target URL
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Raw JSON body text
    pub raw_body: String,
    /// Body encoding
    pub body_mode: BodyMode,
    /// Form rows
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// Where a snapshot should be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupTarget {
    /// An existing group, chosen from the list
    Existing(String),
    /// A new group with a user-typed name
    CreateNew(String),
}

impl GroupTarget {
    /// Resolves the group name, falling back to [`DEFAULT_GROUP`] when blank.
    #[must_use]
    pub fn resolve(&self) -> String {
        let name = match self {
            Self::Existing(name) | Self::CreateNew(name) => name.trim(),
        };
        if name.is_empty() {
            DEFAULT_GROUP.to_string()
        } else {
            name.to_string()
        }
    }
}

/// Result of saving a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot was appended to the group
    Saved {
        /// Group the snapshot landed in
        group: String,
    },
    /// An equal snapshot already exists in the group; nothing was written
    AlreadySaved {
        /// Group holding the duplicate
        group: String,
    },
}

impl SaveOutcome {
    /// Returns true if the save wrote a new entry.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Ordered mapping from group name to its saved snapshots.
///
/// Groups keep their insertion order; a group never stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedGroups(IndexMap<String, Vec<RequestSnapshot>>);

impl SavedGroups {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshots of a group.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[RequestSnapshot]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Iterates over groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RequestSnapshot])> {
        self.0.iter().map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    /// Returns the group names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a snapshot to a group unless an equal one is already there.
    pub fn insert(&mut self, group: &str, snapshot: RequestSnapshot) -> SaveOutcome {
        let list = self.0.entry(group.to_string()).or_default();
        if list.contains(&snapshot) {
            return SaveOutcome::AlreadySaved {
                group: group.to_string(),
            };
        }
        list.push(snapshot);
        SaveOutcome::Saved {
            group: group.to_string(),
        }
    }

    /// Removes the snapshot at `index`, dropping the group once it is empty.
    pub fn remove(&mut self, group: &str, index: usize) -> Option<RequestSnapshot> {
        let list = self.0.get_mut(group)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.0.shift_remove(group);
        }
        Some(removed)
    }

    /// Returns true if any group holds a snapshot equal to `snapshot`.
    #[must_use]
    pub fn contains(&self, snapshot: &RequestSnapshot) -> bool {
        self.0.values().any(|list| list.contains(snapshot))
    }
}
