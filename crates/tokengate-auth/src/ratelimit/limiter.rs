//! Sharded store of counting windows.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use tokengate_core::traits::Clock;

use super::policy::Endpoint;
use super::window::{Admission, RateWindow};
use crate::error::AuthError;

type WindowKey = (String, Endpoint);

/// A window plus a tombstone set when the sweeper evicts it.
///
/// A caller that cloned the cell before eviction sees `retired` after taking
/// the lock and retries against the map, so no request is counted in a
/// window that is no longer reachable.
#[derive(Debug, Default)]
struct WindowSlot {
    window: RateWindow,
    retired: bool,
}

/// Counts requests per `(caller key, endpoint)` and enforces each
/// endpoint's [`RatePolicy`](super::RatePolicy).
///
/// Check-and-increment for one pair is atomic; different pairs never block
/// one another beyond a shard lookup.
#[derive(Debug)]
pub struct RateLimiter {
    windows: DashMap<WindowKey, Arc<Mutex<WindowSlot>>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Creates an empty limiter reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            clock,
        }
    }

    /// Records one request from `key` to `endpoint` and decides whether it
    /// is admitted.
    pub fn admit(&self, key: &str, endpoint: Endpoint) -> Admission {
        let policy = endpoint.policy();
        let map_key = (key.to_owned(), endpoint);

        loop {
            let cell = self.cell(&map_key);
            let mut slot = cell.lock();
            if slot.retired {
                continue;
            }

            let now = self.clock.monotonic();
            let admission = slot.window.record(now, policy);
            drop(slot);

            if let Admission::Rejected { retry_after } = admission {
                warn!(
                    client = %key,
                    endpoint = %endpoint,
                    retry_after_secs = retry_after.as_secs(),
                    "Rate limit exceeded"
                );
            }
            return admission;
        }
    }

    /// Like [`admit`](Self::admit) but as a `Result`.
    pub fn check(&self, key: &str, endpoint: Endpoint) -> Result<u32, AuthError> {
        match self.admit(key, endpoint) {
            Admission::Admitted { remaining } => Ok(remaining),
            Admission::Rejected { retry_after } => Err(AuthError::RateLimited { retry_after }),
        }
    }

    /// Evicts windows idle for at least `idle_windows` window lengths.
    ///
    /// Windows currently locked by a request are left alone. Returns the
    /// number of windows removed.
    pub fn sweep(&self, idle_windows: u32) -> usize {
        let now = self.clock.monotonic();
        let before = self.windows.len();

        self.windows.retain(|(_, endpoint), cell| {
            let Some(mut slot) = cell.try_lock() else {
                return true;
            };
            if slot.window.is_idle(now, endpoint.policy(), idle_windows) {
                slot.retired = true;
                false
            } else {
                true
            }
        });

        let removed = before.saturating_sub(self.windows.len());
        if removed > 0 {
            debug!(removed, remaining = self.windows.len(), "Swept idle rate windows");
        }
        removed
    }

    /// Number of live windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no windows are tracked.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn cell(&self, key: &WindowKey) -> Arc<Mutex<WindowSlot>> {
        if let Some(existing) = self.windows.get(key) {
            return Arc::clone(existing.value());
        }
        Arc::clone(
            self.windows
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(WindowSlot::default())))
                .value(),
        )
    }
}
