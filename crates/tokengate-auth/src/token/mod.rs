//! Signed access tokens: issuance, validation, and the claims they carry.
//!
//! Tokens are HS256 JWTs. They are never stored server-side; the only way a
//! token stops working is by expiring.

pub mod claims;
pub mod decoder;
pub mod encoder;

use std::sync::Arc;

use tokengate_core::error::AppError;
use tokengate_core::traits::Clock;
use tokengate_entity::User;

pub use claims::Claims;
pub use decoder::TokenDecoder;
pub use encoder::{IssuedToken, TokenEncoder};

use crate::error::AuthError;

/// Access token lifetime. Fixed; clients rely on it.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Mints and validates access tokens.
///
/// Holds only the immutable secret and a clock, so it is shared across
/// requests without locking.
#[derive(Debug, Clone)]
pub struct TokenService {
    encoder: TokenEncoder,
    decoder: TokenDecoder,
}

impl TokenService {
    /// Creates a token service signing with `secret`.
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: TokenEncoder::new(secret, Arc::clone(&clock)),
            decoder: TokenDecoder::new(secret, clock),
        }
    }

    /// Issues a token for `user` carrying its role's scopes.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        self.encoder.issue(user)
    }

    /// Validates a raw token and returns its claims.
    pub fn validate(&self, raw: &str) -> Result<Claims, AuthError> {
        self.decoder.validate(raw)
    }
}
