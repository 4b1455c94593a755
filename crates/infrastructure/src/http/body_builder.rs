//! HTTP request body builder.
//!
//! Turns the transport-neutral `OutboundBody` into something reqwest can
//! send.

use reqwest::multipart::{Form, Part};
use restlab_domain::request::{MultipartPart, OutboundBody};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// Invalid body configuration.
    #[error("Invalid body configuration: {message}")]
    InvalidConfig {
        /// What was wrong
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Underlying message
        message: String,
    },
}

/// Result of building a body.
pub enum BuiltBody {
    /// No body.
    None,
    /// Text body with its content type.
    Text {
        /// Encoded body text
        content: String,
        /// Content type to declare when the request has none
        content_type: &'static str,
    },
    /// Multipart form data.
    Multipart(Form),
}

impl BuiltBody {
    /// Get the Content-Type header value.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Text { content_type, .. } => Some(*content_type),
            Self::None | Self::Multipart(_) => None, // reqwest sets this automatically with boundary
        }
    }

    /// Check if this is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Check if this body is empty/none.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Build an HTTP body from an outbound body.
///
/// # Errors
///
/// Returns an error if the form fields cannot be url-encoded or a file part
/// carries an unusable MIME type.
pub fn build_body(body: &OutboundBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        OutboundBody::None => Ok(BuiltBody::None),

        OutboundBody::Json(content) => Ok(BuiltBody::Text {
            content: content.clone(),
            content_type: "application/json",
        }),

        OutboundBody::UrlEncoded(pairs) => {
            let encoded = serde_urlencoded::to_string(pairs).map_err(|e| {
                BodyBuildError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            Ok(BuiltBody::Text {
                content: encoded,
                content_type: "application/x-www-form-urlencoded",
            })
        }

        OutboundBody::Multipart(parts) => build_multipart_form(parts).map(BuiltBody::Multipart),
    }
}

/// Build a multipart form from text and file parts.
fn build_multipart_form(parts: &[MultipartPart]) -> Result<Form, BodyBuildError> {
    let mut form = Form::new();

    for part in parts {
        match part {
            MultipartPart::Text { name, value } => {
                form = form.text(name.clone(), value.clone());
            }
            MultipartPart::File { name, file } => {
                let part = Part::bytes(file.content.to_vec())
                    .file_name(file.file_name.clone())
                    .mime_str(&file.mime_type)
                    .map_err(|e| BodyBuildError::InvalidConfig {
                        message: format!("Invalid MIME type {:?}: {e}", file.mime_type),
                    })?;
                form = form.part(name.clone(), part);
            }
        }
    }

    Ok(form)
}
