//! Request body composition types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};
use crate::id::generate_id;

/// How a tab's body is encoded when the method carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Raw JSON text
    #[default]
    Raw,
    /// Multipart form data
    Form,
    /// Form URL encoded
    Urlencoded,
}

impl BodyMode {
    /// Returns the mode as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Form => "form",
            Self::Urlencoded => "urlencoded",
        }
    }

    /// Returns the content type the dispatcher declares for this mode.
    ///
    /// Multipart bodies return `None`: the transport sets the header
    /// together with the boundary.
    #[must_use]
    pub const fn content_type(self) -> Option<&'static str> {
        match self {
            Self::Raw => Some("application/json"),
            Self::Form => None,
            Self::Urlencoded => Some("application/x-www-form-urlencoded"),
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "form" => Ok(Self::Form),
            "urlencoded" => Ok(Self::Urlencoded),
            other => Err(DomainError::UnsupportedBodyMode(other.to_string())),
        }
    }
}

/// Whether a form field carries text or refers to a bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Plain text value
    #[default]
    Text,
    /// File picked by the user; the bytes live in the tab's file bindings
    File,
}

/// One row of a form or url-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormField {
    /// Row identifier, the key for file bindings
    pub id: String,
    /// Field name
    #[serde(default)]
    pub name: String,
    /// Field value (ignored for file fields)
    #[serde(default)]
    pub value: String,
    /// Field kind
    #[serde(default)]
    pub kind: FieldKind,
}

impl FormField {
    /// Creates a text field with a fresh id.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            value: value.into(),
            kind: FieldKind::Text,
        }
    }

    /// Creates a file field with a fresh id and no value.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            value: String::new(),
            kind: FieldKind::File,
        }
    }

    /// Returns true when the field name is blank after trimming.
    #[must_use]
    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}
