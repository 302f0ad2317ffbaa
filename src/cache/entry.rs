//! Cache Entry Module
//!
//! Defines the structure for individual cached responses.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cached response with metadata.
///
/// Entries are replaced wholesale on a successful fetch and are never
/// mutated in place. A stale entry is kept around indefinitely so it can
/// serve as a fallback when a refresh fails; only explicit invalidation
/// removes it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The decoded JSON response body
    pub value: Value,
    /// When the response was fetched
    pub fetched_at: DateTime<Utc>,
    /// The endpoint the response came from
    pub source_endpoint: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry for a response fetched at the given instant.
    pub fn new(value: Value, fetched_at: DateTime<Utc>, source_endpoint: impl Into<String>) -> Self {
        Self {
            value,
            fetched_at,
            source_endpoint: source_endpoint.into(),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still fresh for the given TTL.
    ///
    /// Boundary condition: an entry is fresh while `now - fetched_at < ttl`.
    /// Once the full TTL has elapsed the entry is stale, though it remains
    /// stored as a fallback value.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }

    // == Age ==
    /// Returns how long ago the entry was fetched.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }
}
