//! Repository implementations for all TokenGate entities.

pub mod product;
pub mod user;

pub use product::ProductRepository;
pub use user::UserRepository;
