//! Request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod health;
pub mod product;
