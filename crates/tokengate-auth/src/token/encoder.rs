//! Token creation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tokengate_core::error::AppError;
use tokengate_core::traits::Clock;
use tokengate_entity::User;

use super::ACCESS_TOKEN_TTL_MINUTES;
use super::claims::Claims;

/// Signs access tokens with the server secret.
#[derive(Clone)]
pub struct TokenEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Source of the issued-at time.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder").finish_non_exhaustive()
    }
}

/// A freshly signed token together with what the login response reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded, signed token.
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// The claims that were signed.
    pub claims: Claims,
}

impl TokenEncoder {
    /// Creates a new encoder for `secret`.
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    /// Issues an access token for `user`.
    ///
    /// Scopes are derived from the user's current role and frozen into the
    /// token; later role changes do not affect it.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, AppError> {
        let now = self.clock.now();
        let iat = now.timestamp();
        let ttl_seconds = ACCESS_TOKEN_TTL_MINUTES * 60;

        let claims = Claims {
            sub: user.id,
            role: user.role,
            scopes: user.scopes().to_vec(),
            iat,
            exp: iat + ttl_seconds,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        debug!(user_id = %user.id, role = %user.role, "Issued access token");

        Ok(IssuedToken {
            access_token,
            expires_in: ttl_seconds as u64,
            expires_at: claims.expires_at(),
            claims,
        })
    }
}
