//! Registration, login, and identity lookup.

pub mod service;

pub use service::{AuthService, LoginOutcome, RegisterUser};
