//! Transport-neutral description of the request a dispatch sends.

use crate::request::{FileHandle, HttpMethod};

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

impl Header {
    /// Creates a header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    /// Text part
    Text {
        /// Part name
        name: String,
        /// Part value
        value: String,
    },
    /// File part
    File {
        /// Part name
        name: String,
        /// Bound file
        file: FileHandle,
    },
}

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutboundBody {
    /// No body
    #[default]
    None,
    /// Literal JSON text, already validated
    Json(String),
    /// Name/value pairs to encode as `application/x-www-form-urlencoded`
    UrlEncoded(Vec<(String, String)>),
    /// Multipart form parts
    Multipart(Vec<MultipartPart>),
}

impl OutboundBody {
    /// Returns whether there is no body.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Fully composed request, ready for the HTTP client port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL, trimmed
    pub url: String,
    /// Headers to send
    pub headers: Vec<Header>,
    /// Request body
    pub body: OutboundBody,
}

impl OutboundRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: OutboundBody::None,
        }
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}
