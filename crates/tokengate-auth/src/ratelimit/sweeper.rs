//! Background eviction of idle rate windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info};

use tokengate_core::config::RateLimitConfig;

use super::limiter::RateLimiter;

/// Periodically sweeps a [`RateLimiter`] so abandoned caller keys do not
/// accumulate.
#[derive(Debug, Clone)]
pub struct RateLimitSweeper {
    limiter: Arc<RateLimiter>,
    interval: Duration,
    idle_windows: u32,
}

impl RateLimitSweeper {
    /// Creates a sweeper using the configured interval and idle threshold.
    pub fn new(limiter: Arc<RateLimiter>, config: &RateLimitConfig) -> Self {
        Self {
            limiter,
            interval: config.sweep_interval(),
            idle_windows: config.idle_windows,
        }
    }

    /// Runs the sweep loop until `cancel` flips to `true` or its sender is
    /// dropped.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_secs = self.interval.as_secs(),
            idle_windows = self.idle_windows,
            "Rate limit sweeper started"
        );

        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let removed = self.limiter.sweep(self.idle_windows);
                    debug!(removed, live = self.limiter.len(), "Rate limit sweep completed");
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        info!("Rate limit sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use tokengate_core::traits::ManualClock;

    use super::*;
    use crate::ratelimit::Endpoint;

    #[tokio::test]
    async fn test_sweeper_evicts_and_stops() {
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let limiter = Arc::new(RateLimiter::new(Arc::new(clock.clone())));
        limiter.admit("idle", Endpoint::Login);
        clock.advance(Duration::from_secs(3600));

        let config = RateLimitConfig {
            sweep_interval_seconds: 1,
            ..RateLimitConfig::default()
        };
        let sweeper = RateLimitSweeper::new(Arc::clone(&limiter), &config);
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move { sweeper.run(rx).await });

        for _ in 0..50 {
            if limiter.is_empty() {
                break;
            }
            time::sleep(Duration::from_millis(20)).await;
        }
        assert!(limiter.is_empty());

        tx.send(true).unwrap();
        time::timeout(Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
