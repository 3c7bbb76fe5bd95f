//! Time sources for timestamp signing.

use std::fmt;

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Injected into timestamp signers so tests can pin "now" without
/// touching process-wide state.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Whole seconds since the Unix epoch, clamped to zero.
    fn epoch_seconds(&self) -> u64 {
        u64::try_from(self.now().timestamp()).unwrap_or(0)
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Create a clock that always reports `at`.
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Create a clock from Unix epoch seconds.
    ///
    /// Returns `None` if `secs` is out of range for [`DateTime`].
    #[must_use]
    pub fn from_timestamp(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::from_timestamp(1_727_445_600).unwrap();
        assert_eq!(clock.epoch_seconds(), 1_727_445_600);
        assert_eq!(clock.now().to_rfc3339(), "2024-09-27T14:00:00+00:00");
    }

    #[test]
    fn test_pre_epoch_clamps_to_zero() {
        let clock = FixedClock::from_timestamp(-5).unwrap();
        assert_eq!(clock.epoch_seconds(), 0);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock.epoch_seconds() > 1_704_067_200);
    }
}
