//! # tokengate-database
//!
//! Concurrent in-memory repositories for TokenGate entities. State lives for
//! the lifetime of the process.

pub mod repositories;

pub use repositories::{ProductRepository, UserRepository};
