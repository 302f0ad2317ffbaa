//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Fetch Cache Error Enum ==
/// Unified error type for cached fetches.
///
/// All variants are `Clone` so a single fetch outcome can be fanned out to
/// every caller coalesced onto the same in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchCacheError {
    /// The server answered with a non-2xx status
    #[error("HTTP error {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// The request never produced a response (connection failure, DNS, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, FetchCacheError>;
