//! # tokengate-service
//!
//! Business logic service layer for TokenGate. Services orchestrate the
//! repositories, the token service, and the authorization engine to
//! implement the application's use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every protected operation
//! takes a [`RequestContext`] and checks its requirement before touching
//! storage.

pub mod auth;
pub mod context;
pub mod product;
pub mod user;

pub use auth::{AuthService, LoginOutcome, RegisterUser};
pub use context::RequestContext;
pub use product::ProductService;
pub use user::AdminUserService;
