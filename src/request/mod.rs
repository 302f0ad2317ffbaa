//! Request Module
//!
//! Fetch options, URL building and cache key derivation.

mod key;
mod options;

// Re-export public types
pub use key::{build_url, derive_cache_key};
pub use options::{FetchOptions, Method};
