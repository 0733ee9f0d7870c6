//! # tokengate-auth
//!
//! The three request-time decisions TokenGate makes, plus password handling.
//!
//! ## Modules
//!
//! - `token`: signed token issuance and validation
//! - `authz`: role and scope authorization decisions
//! - `ratelimit`: fixed-window admission per caller key and endpoint
//! - `password`: Argon2id password hashing and credential policy
//! - `error`: the authentication/authorization failure taxonomy

pub mod authz;
pub mod error;
pub mod password;
pub mod ratelimit;
pub mod token;

pub use authz::{AuthorizationEngine, Decision, DenyReason, Requirement};
pub use error::AuthError;
pub use password::{PasswordHasher, PasswordValidator};
pub use ratelimit::{Admission, Endpoint, RateLimitSweeper, RateLimiter, RatePolicy};
pub use token::{ACCESS_TOKEN_TTL_MINUTES, Claims, IssuedToken, TokenService};
