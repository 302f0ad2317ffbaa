//! Clock Module
//!
//! Abstracts the time source so freshness and debounce decisions can be
//! driven deterministically in tests.

use chrono::{DateTime, Utc};

// == Clock Trait ==
/// Source of the current time for freshness and debounce checks.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
