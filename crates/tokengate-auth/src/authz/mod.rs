//! Role and scope authorization.

pub mod engine;
pub mod requirement;

pub use engine::{AuthorizationEngine, Decision, DenyReason};
pub use requirement::Requirement;
