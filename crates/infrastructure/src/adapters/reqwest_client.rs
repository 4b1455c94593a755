//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Each call is sent exactly once with no timeout.

use std::time::Instant;

use reqwest::{Client, Method, Url};
use restlab_application::ports::{HttpClient, HttpClientError};
use restlab_domain::request::{HttpMethod, OutboundRequest};
use restlab_domain::response::TransportResponse;

use crate::http::{BuiltBody, build_body};

/// Redirects followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "RESTLab/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("RESTLab/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn error_host(error: &reqwest::Error) -> String {
        error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string()
    }

    /// Joins the error with its sources; reqwest keeps the OS reason there.
    fn describe(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_connect() {
            let message = Self::describe(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: Self::error_host(error),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: Self::error_host(error),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(Self::describe(error))
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse, HttpClientError> {
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let parsed_url =
            Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

        let built = build_body(&body).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), parsed_url);

        for header in &headers {
            builder = builder.header(&header.name, &header.value);
        }

        // Add Content-Type if body has one and not already set
        if let Some(content_type) = built.content_type() {
            let has_content_type = headers
                .iter()
                .any(|h| h.name.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                builder = builder.header("Content-Type", content_type);
            }
        }

        builder = match built {
            BuiltBody::None => builder,
            BuiltBody::Text { content, .. } => builder.body(content),
            BuiltBody::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%method, url = %url, "sending request");

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();

        let response_headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body_bytes = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::BodyRead(e.to_string()))?
            .to_vec();

        let duration = start.elapsed();

        Ok(TransportResponse::new(
            status,
            response_headers,
            body_bytes,
            duration,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Post),
            Method::POST
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = ReqwestHttpClient::new().unwrap();
        let result = client
            .execute(OutboundRequest::new(HttpMethod::Get, "not a url"))
            .await;
        assert!(matches!(result, Err(HttpClientError::InvalidUrl(_))));
    }
}
