//! Fetch Options Module
//!
//! Caller-supplied parameters for a cached fetch.

use chrono::Duration;
use serde_json::Value;

// == Method ==
/// HTTP method of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// GET (the default)
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
}

impl Method {
    /// Returns the method as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Fetch Options ==
/// Options for a single cached fetch.
///
/// Domain helpers typically set a TTL and an explicit cache key per logical
/// resource and leave the rest at defaults.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Freshness window; falls back to the configured default when None
    pub ttl: Option<Duration>,
    /// Skip the freshness check and fetch anew (debounce still applies)
    pub force_refresh: bool,
    /// Explicit cache key, overriding derivation from the request shape
    pub cache_key: Option<String>,
    /// HTTP method (default GET)
    pub method: Method,
    /// JSON body sent for non-GET methods
    pub body: Option<Value>,
    /// Headers merged over the default JSON content type
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the endpoint
    pub params: Vec<(String, String)>,
}

impl FetchOptions {
    /// Creates options with all defaults (GET, default TTL, no overrides).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the freshness window for this fetch.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Requests a fresh fetch even if a fresh cache entry exists.
    pub fn force_refresh(mut self, force: bool) -> Self {
        self.force_refresh = force;
        self
    }

    /// Overrides the derived cache key.
    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the JSON request body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    // == Merged Headers ==
    /// Returns the request headers merged over the default JSON content type.
    ///
    /// A caller-supplied header with the same (case-insensitive) name
    /// replaces the default.
    pub(crate) fn merged_headers(&self) -> Vec<(String, String)> {
        let mut merged: Vec<(String, String)> =
            vec![("content-type".to_string(), "application/json".to_string())];

        for (name, value) in &self.headers {
            if let Some(existing) = merged
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
            {
                existing.1 = value.clone();
            } else {
                merged.push((name.clone(), value.clone()));
            }
        }
        merged
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_defaults() {
        let options = FetchOptions::new();
        assert_eq!(options.method, Method::Get);
        assert!(options.ttl.is_none());
        assert!(!options.force_refresh);
        assert!(options.cache_key.is_none());
        assert!(options.body.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = FetchOptions::new()
            .ttl(Duration::seconds(30))
            .force_refresh(true)
            .cache_key("nba_games")
            .method(Method::Post)
            .body(json!({"page": 1}))
            .param("season", "2025");

        assert_eq!(options.ttl, Some(Duration::seconds(30)));
        assert!(options.force_refresh);
        assert_eq!(options.cache_key.as_deref(), Some("nba_games"));
        assert_eq!(options.method, Method::Post);
        assert_eq!(options.body, Some(json!({"page": 1})));
        assert_eq!(options.params, vec![("season".to_string(), "2025".to_string())]);
    }

    #[test]
    fn test_merged_headers_default_content_type() {
        let options = FetchOptions::new();
        let headers = options.merged_headers();
        assert_eq!(
            headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_merged_headers_override_is_case_insensitive() {
        let options = FetchOptions::new().header("Content-Type", "text/plain");
        let headers = options.merged_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].1, "text/plain");
    }

    #[test]
    fn test_merged_headers_extra_headers_appended() {
        let options = FetchOptions::new().header("x-api-key", "secret");
        let headers = options.merged_headers();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers[1], ("x-api-key".to_string(), "secret".to_string()));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
