//! Cached Client Module
//!
//! The long-lived service object owning the three maps that drive caching:
//! the response store, the in-flight registry and the debounce timestamps.
//! All three live behind one lock so the check-then-act sequence that
//! guards the at-most-one-in-flight invariant is atomic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{FetchCacheError, Result};
use crate::request::{build_url, derive_cache_key, FetchOptions};
use crate::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};

/// A fetch shared by every caller coalesced onto the same key.
type SharedFetch = Shared<BoxFuture<'static, Result<Value>>>;

// == Shared State ==
/// The three maps mutated by the client, guarded together.
#[derive(Default)]
struct State {
    /// Cached responses by key
    store: CacheStore,
    /// At most one pending fetch per key
    in_flight: HashMap<String, SharedFetch>,
    /// When a fetch was last initiated per key
    last_attempt: HashMap<String, DateTime<Utc>>,
}

// == Cached Client ==
/// Response cache with request coalescing, debouncing and stale-on-error
/// fallback.
///
/// One instance is expected to live for the whole run of the application;
/// domain helpers share it and call [`fetch_with_cache`](Self::fetch_with_cache)
/// with their endpoint, TTL and cache key.
pub struct CachedClient<T: Transport = HttpTransport> {
    transport: Arc<T>,
    clock: Arc<dyn Clock>,
    config: CacheConfig,
    logging: Arc<AtomicBool>,
    state: Arc<RwLock<State>>,
}

impl CachedClient<HttpTransport> {
    /// Creates a client over a fresh reqwest-backed transport.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_transport(HttpTransport::new(), config)
    }
}

impl<T: Transport> CachedClient<T> {
    /// Creates a client with an injected transport and the system clock.
    pub fn with_transport(transport: T, config: CacheConfig) -> Self {
        Self::with_parts(transport, SystemClock, config)
    }

    /// Creates a client with an injected transport and clock.
    ///
    /// Tests use this to drive freshness and debounce decisions
    /// deterministically.
    pub fn with_parts(transport: T, clock: impl Clock + 'static, config: CacheConfig) -> Self {
        let logging = Arc::new(AtomicBool::new(config.logging));
        Self {
            transport: Arc::new(transport),
            clock: Arc::new(clock),
            config,
            logging,
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    // == Logging Toggle ==
    /// Enables or disables log emission at runtime.
    pub fn enable_logging(&self, enabled: bool) {
        self.logging.store(enabled, Ordering::Relaxed);
    }

    fn logging_enabled(&self) -> bool {
        self.logging.load(Ordering::Relaxed)
    }

    // == Fetch With Cache ==
    /// Fetches a JSON response through the cache.
    ///
    /// Decision sequence, each step short-circuiting:
    /// 1. Build the full URL (sorted query parameters) and the cache key.
    /// 2. Debounce: a fetch initiated for this key within the debounce
    ///    window returns the cached value if one exists, fresh or stale.
    /// 3. Cache: unless `force_refresh`, a fresh entry is returned as-is.
    /// 4. In-flight: a pending fetch for this key is joined, all callers
    ///    sharing its outcome.
    /// 5. Otherwise a new fetch is started and registered.
    ///
    /// On success the decoded body is cached and returned. On failure the
    /// last cached value for the key is returned instead if one exists;
    /// without one the error propagates.
    pub async fn fetch_with_cache(&self, endpoint: &str, options: FetchOptions) -> Result<Value> {
        let url = build_url(endpoint, &options.params);
        let key = match &options.cache_key {
            Some(key) => key.clone(),
            None => derive_cache_key(options.method, &url, options.body.as_ref()),
        };
        let ttl = options.ttl.unwrap_or(self.config.default_ttl);
        let now = self.clock.now();

        let shared = {
            let mut state = self.state.write().await;

            // Debounce: rapid repeats within the window are served from the
            // cache regardless of freshness or force_refresh. Without a
            // cached value this falls through; it is not a rate limit.
            if let Some(last) = state.last_attempt.get(&key) {
                if now.signed_duration_since(*last) < self.config.debounce_window {
                    if let Some(entry) = state.store.peek(&key) {
                        if self.logging_enabled() {
                            debug!(key = %key, "debounced, serving cached value");
                        }
                        return Ok(entry.value.clone());
                    }
                }
            }

            // Freshness check
            if !options.force_refresh {
                if let Some(value) = state.store.get_fresh(&key, ttl, now) {
                    if self.logging_enabled() {
                        debug!(key = %key, "cache hit");
                    }
                    return Ok(value);
                }
            }

            // Join an existing in-flight fetch, or register a new one. Both
            // arms run under the same write lock as the checks above, which
            // keeps the at-most-one-in-flight invariant.
            match state.in_flight.get(&key).cloned() {
                Some(pending) => {
                    if self.logging_enabled() {
                        debug!(key = %key, "joining in-flight fetch");
                    }
                    pending
                }
                None => {
                    state.last_attempt.insert(key.clone(), now);

                    let request = TransportRequest {
                        method: options.method,
                        url: url.clone(),
                        headers: options.merged_headers(),
                        body: options.body.clone(),
                    };
                    if self.logging_enabled() {
                        info!(key = %key, url = %url, method = %options.method, "fetching");
                    }

                    let fetch = Self::execute_fetch(
                        Arc::clone(&self.transport),
                        Arc::clone(&self.state),
                        Arc::clone(&self.clock),
                        Arc::clone(&self.logging),
                        key.clone(),
                        endpoint.to_string(),
                        request,
                    )
                    .boxed()
                    .shared();

                    state.in_flight.insert(key.clone(), fetch.clone());
                    fetch
                }
            }
        };

        shared.await
    }

    // == Fetch Executor ==
    /// Runs the network call and settles the cache.
    ///
    /// On success the decoded body replaces the cache entry for the key.
    /// On any failure an existing entry, stale or not, is served instead;
    /// only a cold failure propagates. The in-flight registration is
    /// removed unconditionally so a completed attempt never blocks the key.
    async fn execute_fetch(
        transport: Arc<T>,
        state: Arc<RwLock<State>>,
        clock: Arc<dyn Clock>,
        logging: Arc<AtomicBool>,
        key: String,
        endpoint: String,
        request: TransportRequest,
    ) -> Result<Value> {
        let result = Self::perform(transport.as_ref(), &request).await;

        let mut state = state.write().await;
        let outcome = match result {
            Ok(value) => {
                let entry = CacheEntry::new(value.clone(), clock.now(), endpoint);
                state.store.insert(key.clone(), entry);
                if logging.load(Ordering::Relaxed) {
                    info!(key = %key, "response cached");
                }
                Ok(value)
            }
            Err(err) => match state.store.peek(&key) {
                Some(entry) => {
                    if logging.load(Ordering::Relaxed) {
                        warn!(key = %key, error = %err, "fetch failed, serving stale cached value");
                    }
                    Ok(entry.value.clone())
                }
                None => {
                    if logging.load(Ordering::Relaxed) {
                        error!(key = %key, error = %err, "fetch failed with no cached fallback");
                    }
                    Err(err)
                }
            },
        };
        state.in_flight.remove(&key);
        outcome
    }

    /// Performs the transport call and decodes the response.
    async fn perform(transport: &T, request: &TransportRequest) -> Result<Value> {
        let TransportResponse { status, body } = transport.execute(request).await?;

        if !(200..300).contains(&status) {
            return Err(FetchCacheError::Http { status, body });
        }

        serde_json::from_str(&body).map_err(|e| FetchCacheError::Decode(e.to_string()))
    }

    // == Introspection ==
    /// Returns the cached value for a key regardless of freshness.
    ///
    /// Pure read; never touches the network or the in-flight registry.
    pub async fn get_cached_data(&self, key: &str) -> Option<Value> {
        let state = self.state.read().await;
        state.store.peek(key).map(|entry| entry.value.clone())
    }

    /// Returns a snapshot of cache contents, pending fetches and entry ages.
    pub async fn cache_stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let now = self.clock.now();
        CacheStats {
            total_entries: state.store.len(),
            total_pending: state.in_flight.len(),
            cache_keys: state.store.keys(),
            age_distribution: state.store.age_distribution(now),
            hits: state.store.hits(),
            misses: state.store.misses(),
        }
    }

    // == Invalidation ==
    /// Removes cached entries.
    ///
    /// With no pattern the whole store is emptied; with a pattern, every
    /// entry whose key contains it as a substring is removed. In-flight
    /// fetches are untouched and will repopulate the cache on completion.
    pub async fn clear_cache(&self, pattern: Option<&str>) {
        let mut state = self.state.write().await;
        let removed = state.store.clear(pattern);
        if self.logging_enabled() {
            info!(
                removed,
                pattern = pattern.unwrap_or("<all>"),
                "cache cleared"
            );
        }
    }

    /// Alias of [`clear_cache`](Self::clear_cache) with a required pattern,
    /// for call-site clarity at invalidation points after mutations.
    pub async fn invalidate_cache(&self, pattern: &str) {
        self.clear_cache(Some(pattern)).await;
    }
}
