//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod json;
pub mod path;

pub use auth::AuthUser;
pub use client::client_key;
pub use json::ValidatedJson;
pub use path::parse_uuid;
