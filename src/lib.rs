//! Fetch Cache - a client-side JSON response cache
//!
//! Sits between domain data-fetch helpers and a remote data source,
//! providing freshness-based caching, request coalescing (at most one
//! network call in flight per key), short-window debouncing and
//! stale-on-error fallback, with explicit pattern-based invalidation.

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod request;
pub mod transport;

pub use cache::{AgeDistribution, CacheStats};
pub use client::CachedClient;
pub use clock::{Clock, SystemClock};
pub use config::CacheConfig;
pub use error::{FetchCacheError, Result};
pub use request::{FetchOptions, Method};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
