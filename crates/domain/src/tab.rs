//! Tabs: independent request compositions with their latest response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::RequestSnapshot;
use crate::id::TabId;
use crate::request::{BodyMode, FileHandle, FormField, HttpMethod};
use crate::response::ResponseEnvelope;

/// Body text a new tab starts with.
pub const DEFAULT_RAW_BODY: &str = "{}";

fn default_raw_body() -> String {
    DEFAULT_RAW_BODY.to_string()
}

/// One in-progress request composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Stable identifier, assigned at creation
    pub id: TabId,
    /// Target URL as typed; may be empty or malformed
    #[serde(default)]
    pub url: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Body encoding for methods other than GET
    #[serde(default)]
    pub body_mode: BodyMode,
    /// JSON text candidate for `raw` mode
    #[serde(default = "default_raw_body")]
    pub raw_body: String,
    /// Rows for `form` and `urlencoded` modes
    #[serde(default)]
    pub fields: Vec<FormField>,
    /// Files bound to `file` rows, keyed by field id. Never persisted.
    #[serde(skip)]
    pub file_bindings: HashMap<String, FileHandle>,
    /// Bearer token, sent when non-blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Latest dispatch outcome
    #[serde(default)]
    pub response: Option<ResponseEnvelope>,
    /// True while a dispatch is in flight
    #[serde(default)]
    pub busy: bool,
}

impl Tab {
    /// Creates a tab with default field values and a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: TabId::generate(),
            url: String::new(),
            method: HttpMethod::default(),
            body_mode: BodyMode::default(),
            raw_body: default_raw_body(),
            fields: Vec::new(),
            file_bindings: HashMap::new(),
            auth_token: None,
            response: None,
            busy: false,
        }
    }

    /// Creates a tab with a fresh id, seeded from a saved snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &RequestSnapshot) -> Self {
        Self {
            url: snapshot.url.clone(),
            method: snapshot.method,
            body_mode: snapshot.body_mode,
            raw_body: snapshot.raw_body.clone(),
            fields: snapshot.fields.clone(),
            ..Self::new()
        }
    }

    /// Returns the request-defining fields of this tab.
    #[must_use]
    pub fn snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            url: self.url.clone(),
            method: self.method,
            raw_body: self.raw_body.clone(),
            body_mode: self.body_mode,
            fields: self.fields.clone(),
        }
    }

    /// Returns the trimmed bearer token when one is set and non-blank.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// Returns the file bound to a field, if any.
    #[must_use]
    pub fn bound_file(&self, field_id: &str) -> Option<&FileHandle> {
        self.file_bindings.get(field_id)
    }

    /// Applies a single-field edit.
    pub fn apply(&mut self, edit: TabEdit) {
        match edit {
            TabEdit::Url(url) => self.url = url,
            TabEdit::Method(method) => self.method = method,
            TabEdit::BodyMode(mode) => self.body_mode = mode,
            TabEdit::RawBody(body) => self.raw_body = body,
            TabEdit::Fields(fields) => self.fields = fields,
            TabEdit::AddField(field) => self.fields.push(field),
            TabEdit::ReplaceField(field) => {
                if let Some(slot) = self.fields.iter_mut().find(|f| f.id == field.id) {
                    *slot = field;
                }
            }
            TabEdit::RemoveField(field_id) => {
                self.fields.retain(|f| f.id != field_id);
                self.file_bindings.remove(&field_id);
            }
            TabEdit::AuthToken(token) => self.auth_token = token,
            TabEdit::BindFile { field_id, file } => {
                self.file_bindings.insert(field_id, file);
            }
            TabEdit::UnbindFile(field_id) => {
                self.file_bindings.remove(&field_id);
            }
            TabEdit::Response(response) => self.response = response,
            TabEdit::Busy(busy) => self.busy = busy,
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::new()
    }
}

/// A change to exactly one named field of a tab.
#[derive(Debug, Clone, PartialEq)]
pub enum TabEdit {
    /// Replace the URL
    Url(String),
    /// Replace the method
    Method(HttpMethod),
    /// Replace the body mode
    BodyMode(BodyMode),
    /// Replace the raw body text
    RawBody(String),
    /// Replace all form rows
    Fields(Vec<FormField>),
    /// Append a form row
    AddField(FormField),
    /// Replace the form row with the same id
    ReplaceField(FormField),
    /// Remove a form row and its file binding
    RemoveField(String),
    /// Replace the bearer token
    AuthToken(Option<String>),
    /// Bind a file to a form row
    BindFile {
        /// Row id
        field_id: String,
        /// File to bind
        file: FileHandle,
    },
    /// Drop the file bound to a form row
    UnbindFile(String),
    /// Replace the response envelope
    Response(Option<ResponseEnvelope>),
    /// Set the in-flight flag
    Busy(bool),
}

impl TabEdit {
    /// Name of the tab field this edit touches.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Method(_) => "method",
            Self::BodyMode(_) => "bodyMode",
            Self::RawBody(_) => "rawBody",
            Self::Fields(_) | Self::AddField(_) | Self::ReplaceField(_) | Self::RemoveField(_) => {
                "fields"
            }
            Self::AuthToken(_) => "authToken",
            Self::BindFile { .. } | Self::UnbindFile(_) => "fileBindings",
            Self::Response(_) => "response",
            Self::Busy(_) => "busy",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::FieldKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_tab_defaults() {
        let tab = Tab::new();
        assert_eq!(tab.url, "");
        assert_eq!(tab.method, HttpMethod::Get);
        assert_eq!(tab.body_mode, BodyMode::Raw);
        assert_eq!(tab.raw_body, "{}");
        assert!(tab.fields.is_empty());
        assert!(tab.response.is_none());
        assert!(!tab.busy);
    }

    #[test]
    fn test_bearer_token_trims_and_skips_blank() {
        let mut tab = Tab::new();
        assert_eq!(tab.bearer_token(), None);

        tab.apply(TabEdit::AuthToken(Some("   ".to_string())));
        assert_eq!(tab.bearer_token(), None);

        tab.apply(TabEdit::AuthToken(Some("  abc ".to_string())));
        assert_eq!(tab.bearer_token(), Some("abc"));
    }

    #[test]
    fn test_field_edits() {
        let mut tab = Tab::new();
        let field = FormField::file("avatar");
        let field_id = field.id.clone();
        tab.apply(TabEdit::AddField(field.clone()));
        tab.apply(TabEdit::BindFile {
            field_id: field_id.clone(),
            file: FileHandle::new("a.png", "image/png", vec![1, 2, 3]),
        });
        assert!(tab.bound_file(&field_id).is_some());

        let renamed = FormField {
            name: "photo".to_string(),
            ..field
        };
        tab.apply(TabEdit::ReplaceField(renamed));
        assert_eq!(tab.fields[0].name, "photo");
        assert_eq!(tab.fields[0].kind, FieldKind::File);

        tab.apply(TabEdit::RemoveField(field_id.clone()));
        assert!(tab.fields.is_empty());
        assert!(tab.bound_file(&field_id).is_none());
    }

    #[test]
    fn test_snapshot_roundtrip_gets_fresh_id() {
        let mut tab = Tab::new();
        tab.apply(TabEdit::Url("https://api.example.com".to_string()));
        tab.apply(TabEdit::Method(HttpMethod::Post));
        tab.apply(TabEdit::AuthToken(Some("t".to_string())));

        let reopened = Tab::from_snapshot(&tab.snapshot());
        assert_ne!(reopened.id, tab.id);
        assert_eq!(reopened.snapshot(), tab.snapshot());
        assert_eq!(reopened.auth_token, None);
    }

    #[test]
    fn test_serialization_skips_file_bindings() {
        let mut tab = Tab::new();
        let field = FormField::file("doc");
        tab.apply(TabEdit::BindFile {
            field_id: field.id.clone(),
            file: FileHandle::new("d.txt", "text/plain", b"x".to_vec()),
        });
        tab.apply(TabEdit::AddField(field));

        let json = serde_json::to_value(&tab).unwrap();
        assert!(json.get("fileBindings").is_none());
        assert!(json.get("rawBody").is_some());

        let restored: Tab = serde_json::from_value(json).unwrap();
        assert!(restored.file_bindings.is_empty());
        assert_eq!(restored.fields, tab.fields);
    }

    #[test]
    fn test_edit_field_names() {
        assert_eq!(TabEdit::Url(String::new()).field_name(), "url");
        assert_eq!(TabEdit::Busy(true).field_name(), "busy");
        assert_eq!(TabEdit::UnbindFile(String::new()).field_name(), "fileBindings");
    }
}
