//! Mock implementations for testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use itsdangerous::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while a
/// signer holds another.
#[derive(Debug, Clone)]
pub struct MockClock {
    secs: Arc<AtomicI64>,
}

impl MockClock {
    /// Create a clock at `secs` since the Unix epoch.
    #[must_use]
    pub fn at(secs: i64) -> Self {
        Self {
            secs: Arc::new(AtomicI64::new(secs)),
        }
    }

    /// Create a clock at an RFC 3339 instant such as `2024-09-27T14:00:00Z`.
    ///
    /// # Panics
    ///
    /// Panics if `rfc3339` does not parse.
    #[must_use]
    pub fn at_rfc3339(rfc3339: &str) -> Self {
        let at = DateTime::parse_from_rfc3339(rfc3339)
            .unwrap_or_else(|e| panic!("invalid RFC 3339 instant {rfc3339:?}: {e}"));
        Self::at(at.timestamp())
    }

    /// Jump to `secs` since the Unix epoch.
    ///
    /// Reading the clock panics if `secs` is outside the range of
    /// [`DateTime`].
    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }

    /// Move forward (or back, if negative) by `secs`.
    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Current reading in seconds since the Unix epoch.
    #[must_use]
    pub fn secs(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.secs();
        DateTime::<Utc>::from_timestamp(secs, 0)
            .unwrap_or_else(|| panic!("mock clock set out of range: {secs}"))
    }
}
