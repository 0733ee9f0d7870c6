//! # tokengate-core
//!
//! Core crate for TokenGate. Contains the configuration schema, the clock
//! abstraction shared by token expiry and rate-limit windows, the generic
//! repository trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other TokenGate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
