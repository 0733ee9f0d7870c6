//! Time sources.
//!
//! Token expiry is judged against wall-clock time, rate-limit windows against
//! a monotonic reading. Both come from one [`Clock`] so tests can drive them
//! with a [`ManualClock`].

use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// A source of wall-clock and monotonic time.
pub trait Clock: Send + Sync + Debug + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Elapsed time since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
}

/// The real clock.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a system clock whose monotonic origin is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A hand-driven clock for tests. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    wall_millis: Arc<AtomicI64>,
    mono_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`, with the monotonic reading at zero.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            wall_millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
            mono_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves both readings forward.
    pub fn advance(&self, by: Duration) {
        self.wall_millis
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
        self.mono_nanos
            .fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Moves both readings backward, saturating the monotonic one at zero.
    pub fn rewind(&self, by: Duration) {
        self.wall_millis
            .fetch_sub(by.as_millis() as i64, Ordering::SeqCst);
        let by = by.as_nanos() as u64;
        let _ = self
            .mono_nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(by))
            });
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.wall_millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn monotonic(&self) -> Duration {
        Duration::from_nanos(self.mono_nanos.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance_and_rewind() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.monotonic(), Duration::ZERO);

        clock.advance(Duration::from_secs(90));
        assert_eq!(clock.now().timestamp(), 1_700_000_090);
        assert_eq!(clock.monotonic(), Duration::from_secs(90));

        clock.rewind(Duration::from_secs(120));
        assert_eq!(clock.now().timestamp(), 1_699_999_970);
        assert_eq!(clock.monotonic(), Duration::ZERO);
    }

    #[test]
    fn test_clones_share_time() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance(Duration::from_secs(5));
        assert_eq!(other.monotonic(), Duration::from_secs(5));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.monotonic();
        let b = clock.monotonic();
        assert!(b >= a);
    }
}
