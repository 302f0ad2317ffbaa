//! Cache Module
//!
//! Provides in-memory storage of fetched JSON responses with freshness
//! checks, pattern-based invalidation and introspection.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{AgeDistribution, CacheStats};
pub use store::CacheStore;

// == Public Constants ==
/// Entries younger than this count as "recent" in the age distribution
pub const AGE_RECENT_SECS: i64 = 30;

/// Entries younger than this (but not recent) count as "medium"; older are "old"
pub const AGE_MEDIUM_SECS: i64 = 120;
