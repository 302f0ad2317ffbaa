//! Cache Store Module
//!
//! In-memory response store queried by freshness. Entries never expire on
//! their own: a stale entry stays queryable as a fallback value until it is
//! explicitly invalidated. There is no size bound and no eviction.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::cache::{AgeDistribution, CacheEntry, AGE_MEDIUM_SECS, AGE_RECENT_SECS};

// == Cache Store ==
/// Key-value storage of fetched responses with hit/miss counters.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key to entry storage
    entries: HashMap<String, CacheEntry>,
    /// Number of fresh lookups that found a fresh entry
    hits: u64,
    /// Number of fresh lookups that found nothing usable
    misses: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores an entry, replacing any previous entry for the key wholesale.
    pub fn insert(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    // == Get Fresh ==
    /// Returns the value for a key if an entry exists and is still fresh
    /// for the given TTL. Records a hit or miss accordingly.
    ///
    /// A stale entry counts as a miss but is not removed.
    pub fn get_fresh(&mut self, key: &str, ttl: Duration, now: DateTime<Utc>) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(ttl, now) => {
                self.hits += 1;
                Some(entry.value.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    // == Peek ==
    /// Returns the entry for a key regardless of freshness, without touching
    /// the counters. Used for debounce short-circuits and stale fallback.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Clear ==
    /// Removes entries from the store.
    ///
    /// With no pattern, empties the store. With a pattern, removes every
    /// entry whose key contains the pattern as a substring.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self, pattern: Option<&str>) -> usize {
        match pattern {
            None => {
                let removed = self.entries.len();
                self.entries.clear();
                removed
            }
            Some(pattern) => {
                let matching: Vec<String> = self
                    .entries
                    .keys()
                    .filter(|key| key.contains(pattern))
                    .cloned()
                    .collect();

                for key in &matching {
                    self.entries.remove(key);
                }
                matching.len()
            }
        }
    }

    // == Keys ==
    /// Returns the keys of all stored entries.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Age Distribution ==
    /// Buckets entry ages at the given instant.
    pub fn age_distribution(&self, now: DateTime<Utc>) -> AgeDistribution {
        let mut distribution = AgeDistribution::default();
        for entry in self.entries.values() {
            let age_secs = entry.age(now).num_seconds();
            if age_secs < AGE_RECENT_SECS {
                distribution.recent += 1;
            } else if age_secs <= AGE_MEDIUM_SECS {
                distribution.medium += 1;
            } else {
                distribution.old += 1;
            }
        }
        distribution
    }

    // == Counters ==
    /// Number of fresh-lookup hits so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of fresh-lookup misses so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_at(value: Value, fetched_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry::new(value, fetched_at, "/api/test")
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_insert_and_get_fresh() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        store.insert("key1".to_string(), entry_at(json!("value1"), now));
        let value = store.get_fresh("key1", Duration::seconds(60), now);

        assert_eq!(value, Some(json!("value1")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.hits(), 1);
    }

    #[test]
    fn test_store_get_fresh_nonexistent() {
        let mut store = CacheStore::new();

        let value = store.get_fresh("nonexistent", Duration::seconds(60), Utc::now());
        assert_eq!(value, None);
        assert_eq!(store.misses(), 1);
    }

    #[test]
    fn test_store_stale_entry_misses_but_remains() {
        let mut store = CacheStore::new();
        let t0 = Utc::now();

        store.insert("key1".to_string(), entry_at(json!("value1"), t0));

        let later = t0 + Duration::seconds(120);
        let value = store.get_fresh("key1", Duration::seconds(60), later);

        assert_eq!(value, None);
        assert_eq!(store.misses(), 1);
        // Stale entry still available as a fallback
        assert!(store.peek("key1").is_some());
    }

    #[test]
    fn test_store_overwrite_replaces_wholesale() {
        let mut store = CacheStore::new();
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(10);

        store.insert("key1".to_string(), entry_at(json!("old"), t0));
        store.insert("key1".to_string(), entry_at(json!("new"), t1));

        let entry = store.peek("key1").unwrap();
        assert_eq!(entry.value, json!("new"));
        assert_eq!(entry.fetched_at, t1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_peek_does_not_touch_counters() {
        let mut store = CacheStore::new();
        store.insert("key1".to_string(), entry_at(json!(1), Utc::now()));

        let _ = store.peek("key1");
        let _ = store.peek("missing");

        assert_eq!(store.hits(), 0);
        assert_eq!(store.misses(), 0);
    }

    #[test]
    fn test_store_clear_all() {
        let mut store = CacheStore::new();
        let now = Utc::now();
        store.insert("nba_games".to_string(), entry_at(json!(1), now));
        store.insert("nfl_games".to_string(), entry_at(json!(2), now));

        let removed = store.clear(None);

        assert_eq!(removed, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_clear_by_pattern() {
        let mut store = CacheStore::new();
        let now = Utc::now();
        store.insert("nba_games".to_string(), entry_at(json!(1), now));
        store.insert("nba_news".to_string(), entry_at(json!(2), now));
        store.insert("nfl_games".to_string(), entry_at(json!(3), now));

        let removed = store.clear(Some("nba"));

        assert_eq!(removed, 2);
        assert!(store.peek("nba_games").is_none());
        assert!(store.peek("nba_news").is_none());
        assert!(store.peek("nfl_games").is_some());
    }

    #[test]
    fn test_store_clear_pattern_no_match() {
        let mut store = CacheStore::new();
        store.insert("nfl_games".to_string(), entry_at(json!(1), Utc::now()));

        let removed = store.clear(Some("mlb"));

        assert_eq!(removed, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_keys() {
        let mut store = CacheStore::new();
        let now = Utc::now();
        store.insert("a".to_string(), entry_at(json!(1), now));
        store.insert("b".to_string(), entry_at(json!(2), now));

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_store_age_distribution() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        store.insert("recent".to_string(), entry_at(json!(1), now - Duration::seconds(5)));
        store.insert("medium".to_string(), entry_at(json!(2), now - Duration::seconds(60)));
        store.insert("old".to_string(), entry_at(json!(3), now - Duration::seconds(300)));

        let distribution = store.age_distribution(now);
        assert_eq!(distribution.recent, 1);
        assert_eq!(distribution.medium, 1);
        assert_eq!(distribution.old, 1);
    }

    #[test]
    fn test_store_age_distribution_boundaries() {
        let mut store = CacheStore::new();
        let now = Utc::now();

        // Exactly 30s old falls in the medium bucket, exactly 120s stays medium
        store.insert("at_30".to_string(), entry_at(json!(1), now - Duration::seconds(30)));
        store.insert("at_120".to_string(), entry_at(json!(2), now - Duration::seconds(120)));

        let distribution = store.age_distribution(now);
        assert_eq!(distribution.recent, 0);
        assert_eq!(distribution.medium, 2);
        assert_eq!(distribution.old, 0);
    }
}
