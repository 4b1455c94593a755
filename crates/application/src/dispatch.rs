//! Request Dispatcher
//!
//! Turns a tab into one outbound request, performs the call through the
//! `HttpClient` port and normalizes whatever happens into a
//! `ResponseEnvelope`. Failures never escape as errors: each one is
//! rendered into the envelope's `payload.error` message.

use std::sync::Arc;

use restlab_domain::Tab;
use restlab_domain::request::{
    BodyMode, FieldKind, Header, MultipartPart, OutboundBody, OutboundRequest,
};
use restlab_domain::response::{ResponseEnvelope, TransportResponse};
use serde_json::Value;
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// Message used when a transport failure carries no text of its own.
pub const FETCH_FAILED: &str = "Failed to fetch data.";

/// A tab that cannot be sent as composed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// URL is blank.
    #[error("URL is required.")]
    EmptyUrl,

    /// The raw body is not well-formed JSON.
    #[error("Invalid JSON body")]
    InvalidJsonBody,

    /// A file row was used with a url-encoded body.
    #[error("File fields are not supported in url-encoded bodies: {0}")]
    FileInUrlEncoded(String),
}

/// Everything that can go wrong with one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The tab failed validation; no network I/O happened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered 401.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server answered with another non-2xx status.
    #[error("HTTP error! Status: {status}")]
    Http {
        /// Status code, kept only in the message
        status: u16,
    },

    /// Network failure or an unreadable response body.
    #[error("{}", transport_message(.0))]
    Transport(String),
}

fn transport_message(message: &str) -> &str {
    if message.trim().is_empty() {
        FETCH_FAILED
    } else {
        message
    }
}

impl From<HttpClientError> for DispatchError {
    fn from(error: HttpClientError) -> Self {
        Self::Transport(error.to_string())
    }
}

impl DispatchError {
    /// Renders this error as an error envelope.
    ///
    /// The original status of an HTTP error is not carried into the
    /// envelope's status field; it only appears in the message.
    #[must_use]
    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::error(self.to_string())
    }
}

/// Builds the outbound request for a tab.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the URL is blank, the raw body is not
/// JSON, or a file row is used in url-encoded mode.
pub fn compose(tab: &Tab) -> Result<OutboundRequest, ValidationError> {
    let url = tab.url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let mut request = OutboundRequest::new(tab.method, url);

    if tab.method.sends_body() {
        request.body = match tab.body_mode {
            BodyMode::Raw => {
                serde_json::from_str::<Value>(&tab.raw_body)
                    .map_err(|_| ValidationError::InvalidJsonBody)?;
                OutboundBody::Json(tab.raw_body.clone())
            }
            BodyMode::Form => OutboundBody::Multipart(multipart_parts(tab)),
            BodyMode::Urlencoded => OutboundBody::UrlEncoded(urlencoded_pairs(tab)?),
        };
        if let Some(content_type) = tab.body_mode.content_type() {
            request.headers.push(Header::new("Content-Type", content_type));
        }
    }

    if let Some(token) = tab.bearer_token() {
        request
            .headers
            .push(Header::new("Authorization", format!("Bearer {token}")));
    }

    Ok(request)
}

/// Text rows become text parts; file rows contribute their bound file, or
/// nothing when no file is bound. Unnamed rows are skipped.
fn multipart_parts(tab: &Tab) -> Vec<MultipartPart> {
    tab.fields
        .iter()
        .filter(|field| !field.has_blank_name())
        .filter_map(|field| match field.kind {
            FieldKind::Text => Some(MultipartPart::Text {
                name: field.name.clone(),
                value: field.value.clone(),
            }),
            FieldKind::File => tab.bound_file(&field.id).map(|file| MultipartPart::File {
                name: field.name.clone(),
                file: file.clone(),
            }),
        })
        .collect()
}

fn urlencoded_pairs(tab: &Tab) -> Result<Vec<(String, String)>, ValidationError> {
    let mut pairs = Vec::with_capacity(tab.fields.len());
    for field in tab.fields.iter().filter(|field| !field.has_blank_name()) {
        if field.kind == FieldKind::File {
            return Err(ValidationError::FileInUrlEncoded(field.name.clone()));
        }
        pairs.push((field.name.clone(), field.value.clone()));
    }
    Ok(pairs)
}

/// Normalizes a raw transport response into an envelope.
///
/// # Errors
///
/// Returns [`DispatchError::Unauthorized`] for 401, [`DispatchError::Http`]
/// for other non-2xx statuses, and [`DispatchError::Transport`] when a body
/// declared as JSON does not parse.
pub fn normalize(response: &TransportResponse) -> Result<ResponseEnvelope, DispatchError> {
    if !response.is_success() {
        return Err(match response.status {
            401 => DispatchError::Unauthorized,
            status => DispatchError::Http { status },
        });
    }

    let payload = if response.content_type().is_some_and(is_json_content_type) {
        serde_json::from_slice(&response.body).map_err(|e| {
            DispatchError::Transport(format!("Failed to parse JSON response: {e}"))
        })?
    } else {
        Value::String(String::from_utf8_lossy(&response.body).into_owned())
    };

    Ok(ResponseEnvelope::success(response.status, payload))
}

/// True for `application/json` and any `+json` media type.
fn is_json_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.parse::<mime::Mime>().map_or_else(
        |_| content_type.contains("application/json"),
        |media| media.subtype() == mime::JSON || media.suffix() == Some(mime::JSON),
    )
}

/// Use case for dispatching a tab's request.
///
/// # Example
///
/// ```ignore
/// let dispatcher = DispatchRequest::new(Arc::new(ReqwestHttpClient::new()?));
/// let envelope = dispatcher.dispatch(&tab).await;
/// ```
pub struct DispatchRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> DispatchRequest<C> {
    /// Creates a dispatcher over the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Dispatches the tab and always produces an envelope.
    pub async fn dispatch(&self, tab: &Tab) -> ResponseEnvelope {
        match self.execute(tab).await {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::debug!(id = %tab.id, %error, "dispatch failed");
                error.to_envelope()
            }
        }
    }

    /// Dispatches the tab, keeping the error classification.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] describing validation, HTTP or transport
    /// failures.
    pub async fn execute(&self, tab: &Tab) -> Result<ResponseEnvelope, DispatchError> {
        let request = compose(tab)?;
        tracing::info!(id = %tab.id, method = %request.method, url = %request.url, "dispatching request");

        let response = self.client.execute(request).await?;
        tracing::info!(
            id = %tab.id,
            status = response.status,
            size = response.size(),
            elapsed_ms = u64::try_from(response.duration.as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        normalize(&response)
    }
}
