//! Normalized result of one dispatch.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};

/// Status half of an envelope: a transport status or the `"error"` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeStatus {
    /// Transport status code of a successful response
    Code(u16),
    /// The dispatch failed; details are in the payload
    Error,
}

impl EnvelopeStatus {
    /// Returns the status code, if this is not an error.
    #[must_use]
    pub const fn code(self) -> Option<u16> {
        match self {
            Self::Code(code) => Some(code),
            Self::Error => None,
        }
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Error => f.write_str("error"),
        }
    }
}

impl Serialize for EnvelopeStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Code(code) => serializer.serialize_u16(*code),
            Self::Error => serializer.serialize_str("error"),
        }
    }
}

impl<'de> Deserialize<'de> for EnvelopeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(u16),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(Self::Code(code)),
            Raw::Marker(marker) if marker == "error" => Ok(Self::Error),
            Raw::Marker(other) => Err(de::Error::custom(format!(
                "expected a status code or \"error\", got {other:?}"
            ))),
        }
    }
}

/// Outcome of one dispatch, as shown to the user.
///
/// A fresh envelope replaces any previous one on the same tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Transport status or the error marker
    pub status: EnvelopeStatus,
    /// Parsed JSON, raw text, or `{"error": message}`
    pub payload: Value,
}

impl ResponseEnvelope {
    /// Creates a successful envelope.
    #[must_use]
    pub const fn success(status: u16, payload: Value) -> Self {
        Self {
            status: EnvelopeStatus::Code(status),
            payload,
        }
    }

    /// Creates an error envelope carrying `message`.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            payload: json!({ "error": message.into() }),
        }
    }

    /// Returns true if this envelope reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.status, EnvelopeStatus::Error)
    }

    /// Returns the error message of an error envelope.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error() {
            return None;
        }
        self.payload.get("error").and_then(Value::as_str)
    }
}
