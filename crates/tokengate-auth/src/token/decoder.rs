//! Token validation.
//!
//! Validation runs three checks in a fixed order, each producing its own
//! failure:
//!
//! 1. envelope, algorithm, and HMAC over `header.payload` → [`AuthError::TokenForged`]
//! 2. payload encoding and claim structure → [`AuthError::TokenMalformed`]
//! 3. expiry against the injected clock → [`AuthError::TokenExpired`]
//!
//! The signature is checked before the payload is even decoded, so a token
//! that is both forged and expired reports as forged, and a correctly signed
//! payload that is not a claim object reports as malformed.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, crypto, decode_header};
use tracing::warn;

use tokengate_core::traits::Clock;

use super::claims::Claims;
use crate::error::AuthError;

/// The only accepted signing algorithm.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Verifies access tokens against the server secret.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Source of "now" for expiry.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

fn forged(detail: &'static str) -> AuthError {
    warn!(reason = "token_forged", detail, "Rejected token");
    AuthError::TokenForged
}

fn malformed(detail: &'static str) -> AuthError {
    warn!(reason = "token_malformed", detail, "Rejected token");
    AuthError::TokenMalformed
}

impl TokenDecoder {
    /// Creates a new decoder for `secret`.
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    /// Decodes and validates a raw token string.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let payload = self.verify_signature(token)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| malformed("payload is not base64url"))?;

        let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(reason = "token_malformed", error = %e, "Rejected token with malformed claims");
            AuthError::TokenMalformed
        })?;

        if claims.exp <= claims.iat {
            warn!(reason = "token_malformed", iat = claims.iat, exp = claims.exp, "Rejected token with inverted lifetime");
            return Err(AuthError::TokenMalformed);
        }

        if claims.is_expired_at(self.clock.now()) {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Checks the envelope, the pinned algorithm, and the HMAC over
    /// `header.payload`. Returns the still-encoded payload segment.
    fn verify_signature<'t>(&self, token: &'t str) -> Result<&'t str, AuthError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(forged("not a three-part token"));
        };

        let alg = decode_header(token)
            .map_err(|_| forged("undecodable header"))?
            .alg;
        if alg != ALGORITHM {
            return Err(forged("unexpected algorithm"));
        }

        let message = &token[..header.len() + 1 + payload.len()];
        let valid = crypto::verify(signature, message.as_bytes(), &self.decoding_key, ALGORITHM)
            .map_err(|_| forged("undecodable signature"))?;
        if !valid {
            return Err(forged("signature mismatch"));
        }

        Ok(payload)
    }
}
