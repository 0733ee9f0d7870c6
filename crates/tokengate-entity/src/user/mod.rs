//! User domain entities.

pub mod model;
pub mod role;
pub mod scope;

pub use model::User;
pub use role::{Role, role_to_scopes};
pub use scope::Scope;
