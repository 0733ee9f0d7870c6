//! A single fixed counting window.

use std::time::Duration;

use super::policy::RatePolicy;

/// Result of recording one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request fits; `remaining` more fit in this window.
    Admitted {
        /// Requests left before the ceiling.
        remaining: u32,
    },
    /// The ceiling is reached; the window resets after `retry_after`.
    Rejected {
        /// Time until the window resets. Always non-zero.
        retry_after: Duration,
    },
}

impl Admission {
    /// Whether the request was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

/// Request count within a window starting at a monotonic instant.
///
/// Times are offsets from the limiter clock's monotonic origin. A reading
/// earlier than the window start is treated as a fresh window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateWindow {
    count: u32,
    started_at: Option<Duration>,
}

impl RateWindow {
    /// An empty window that starts on its first request.
    pub const fn new() -> Self {
        Self {
            count: 0,
            started_at: None,
        }
    }

    /// Requests counted in the current window.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Records one request at `now` and decides whether it is admitted.
    pub fn record(&mut self, now: Duration, policy: RatePolicy) -> Admission {
        let start = match self.started_at {
            Some(start) if now >= start && now - start < policy.window => start,
            _ => {
                self.count = 0;
                self.started_at = Some(now);
                now
            }
        };

        self.count = self.count.saturating_add(1);

        if self.count <= policy.limit {
            Admission::Admitted {
                remaining: policy.limit - self.count,
            }
        } else {
            Admission::Rejected {
                retry_after: (start + policy.window).saturating_sub(now),
            }
        }
    }

    /// Whether the window has seen no traffic for `idle_windows` window
    /// lengths and can be discarded.
    pub fn is_idle(&self, now: Duration, policy: RatePolicy, idle_windows: u32) -> bool {
        match self.started_at {
            None => true,
            Some(start) if now < start => true,
            Some(start) => now - start >= policy.window * idle_windows.max(1),
        }
    }
}
