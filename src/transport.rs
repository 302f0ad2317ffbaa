//! Transport Module
//!
//! Fetch-shaped abstraction over the HTTP client. The cache layer only
//! needs a status code and a response body back; everything else (TLS,
//! connection pooling, timeouts) belongs to the underlying client.

use std::future::Future;

use crate::error::{FetchCacheError, Result};
use crate::request::Method;

// == Transport Request ==
/// A fully built request handed to the transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Full URL including serialized query parameters
    pub url: String,
    /// Headers, already merged over the defaults
    pub headers: Vec<(String, String)>,
    /// JSON body, sent for non-GET methods
    pub body: Option<serde_json::Value>,
}

// == Transport Response ==
/// Raw response as seen by the cache layer.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code
    pub status: u16,
    /// Raw response body text
    pub body: String,
}

// == Transport Trait ==
/// Capability to perform a network call.
///
/// Production code uses [`HttpTransport`]; tests inject a scripted fake.
pub trait Transport: Send + Sync + 'static {
    /// Executes the request and returns the raw response.
    ///
    /// Implementations report connection-level failures as
    /// [`FetchCacheError::Transport`]; non-2xx statuses are returned as a
    /// normal response and classified by the caller.
    fn execute(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

// == HTTP Transport ==
/// Transport backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh reqwest client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if request.method != Method::Get {
            if let Some(body) = &request.body {
                builder = builder.body(body.to_string());
            }
        }

        async move {
            let response = builder
                .send()
                .await
                .map_err(|e| FetchCacheError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| FetchCacheError::Transport(e.to_string()))?;

            Ok(TransportResponse { status, body })
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Get), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::Patch), reqwest::Method::PATCH);
    }

    #[test]
    fn test_transport_request_is_cloneable() {
        let request = TransportRequest {
            method: Method::Get,
            url: "/api/games".to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: None,
        };
        let cloned = request.clone();
        assert_eq!(cloned.url, request.url);
    }
}
