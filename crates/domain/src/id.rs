//! ID generation utilities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Generates a new UUID v7 as a string.
///
/// UUID v7 includes timestamp information and is sortable, so ids of
/// tabs created later compare greater.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Opaque identifier of a tab, stable for the tab's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Creates a fresh, unused tab id.
    #[must_use]
    pub fn generate() -> Self {
        Self(generate_id())
    }

    /// Wraps an existing id, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] if `id` is blank.
    pub fn parse(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(id));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let id1 = generate_id();
        let id2 = generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_tab_id_parse_rejects_blank() {
        assert!(TabId::parse("   ").is_err());
        assert_eq!(TabId::parse("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_tab_id_serializes_as_plain_string() {
        let id = TabId::parse("tab-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tab-1\"");
    }
}
