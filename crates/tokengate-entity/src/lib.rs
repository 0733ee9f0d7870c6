//! # tokengate-entity
//!
//! Domain models shared by every TokenGate layer: users with their role,
//! the fixed role → scope mapping, and the product resource guarded by it.

pub mod product;
pub mod user;

pub use product::Product;
pub use user::{Role, Scope, User, role_to_scopes};
