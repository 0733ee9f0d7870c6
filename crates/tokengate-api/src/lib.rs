//! # tokengate-api
//!
//! HTTP API layer for TokenGate built on Axum.
//!
//! Every rate-limited route passes through the pipeline
//! rate limiter → token validation → authorization → handler. The rate
//! limiter is a per-route middleware, token validation is the
//! [`AuthUser`](extractors::AuthUser) extractor, and authorization is the
//! first step of each service call.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
