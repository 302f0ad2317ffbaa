//! Cache Key Module
//!
//! Builds the full request URL and derives the deterministic cache key that
//! indexes both the store and the in-flight registry.

use serde_json::Value;
use url::form_urlencoded;

use crate::request::Method;

// == Build URL ==
/// Appends serialized query parameters to an endpoint.
///
/// Parameters are sorted by name (then value) before serialization so that
/// logically equivalent requests always produce the same URL, and therefore
/// the same cache key, regardless of the order the caller supplied them in.
pub fn build_url(endpoint: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let mut pairs: Vec<&(String, String)> = params.iter().collect();
    pairs.sort();

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(name, value)| (name.as_str(), value.as_str())))
        .finish();

    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{endpoint}{separator}{query}")
}

// == Derive Cache Key ==
/// Derives the cache key for a request: `"{METHOD}:{url}:{json(body)}"`.
///
/// Two logically equivalent requests must map to the same key for caching
/// and coalescing to work; the URL passed here is expected to come from
/// [`build_url`], which normalizes parameter order.
pub fn derive_cache_key(method: Method, url: &str, body: Option<&Value>) -> String {
    let body_json = match body {
        Some(body) => body.to_string(),
        None => "null".to_string(),
    };
    format!("{method}:{url}:{body_json}")
}
