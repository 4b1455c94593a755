//! HTTP Client port

use std::future::Future;

use restlab_domain::request::OutboundRequest;
use restlab_domain::response::TransportResponse;

/// Errors raised by the transport while performing a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name did not resolve.
    #[error("Could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying message
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The request body could not be built.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations perform exactly one call per invocation: no retry,
/// no timeout, no cancellation.
pub trait HttpClient: Send + Sync {
    /// Executes a composed request and returns the raw response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the network level or the
    /// response body cannot be read.
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send;
}
