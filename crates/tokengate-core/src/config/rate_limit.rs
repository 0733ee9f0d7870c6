//! Rate limiter housekeeping configuration.
//!
//! The per-endpoint limits themselves are fixed constants in
//! `tokengate-auth`; only enforcement and sweeping are tunable.

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Rate limiter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether admission checks run at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between stale-window sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// A window is stale once it has been idle for this many window lengths.
    #[serde(default = "default_idle_windows")]
    pub idle_windows: u32,
    /// Reverse proxies whose `X-Forwarded-For` is believed. Requests from any
    /// other peer are keyed on the peer address alone.
    #[serde(default)]
    pub trusted_proxies: Vec<IpAddr>,
}

impl RateLimitConfig {
    /// Sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sweep_interval_seconds: default_sweep_interval(),
            idle_windows: default_idle_windows(),
            trusted_proxies: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_idle_windows() -> u32 {
    2
}
