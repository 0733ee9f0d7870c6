//! Core trait definitions shared across the workspace.

pub mod clock;
pub mod repository;

pub use clock::{Clock, ManualClock, SystemClock};
pub use repository::Repository;
