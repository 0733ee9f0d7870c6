//! Per-caller, per-endpoint fixed-window rate limiting.
//!
//! Each `(caller key, endpoint)` pair owns one counting window. Windows live
//! in a sharded map and each sits behind its own lock, so callers contend
//! only with requests for the same pair. A background [`RateLimitSweeper`]
//! evicts windows that have gone idle.

pub mod limiter;
pub mod policy;
pub mod sweeper;
pub mod window;

pub use limiter::RateLimiter;
pub use policy::{Endpoint, RatePolicy};
pub use sweeper::RateLimitSweeper;
pub use window::{Admission, RateWindow};
