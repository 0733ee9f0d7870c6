//! Authentication and authorization failures.
//!
//! Every rejection produced by the token, authorization, and rate-limit
//! components is one of these variants. All are terminal for the request.

use std::time::Duration;

use thiserror::Error;

use tokengate_core::error::{AppError, ErrorKind};
use tokengate_entity::{Role, Scope};

/// Message shared by forged and malformed tokens so responses cannot be used
/// as an oracle.
const INVALID_TOKEN_MESSAGE: &str = "Could not validate credentials";

/// Why a request was refused by the auth core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential, or the Authorization header could not be parsed.
    #[error("missing or unparseable credentials")]
    Unauthenticated,
    /// Signature valid but `exp` has passed.
    #[error("token has expired")]
    TokenExpired,
    /// Signature valid but the claim set does not have the expected shape.
    #[error("token claims are malformed")]
    TokenMalformed,
    /// Signature, algorithm, or envelope check failed.
    #[error("token signature is invalid")]
    TokenForged,
    /// The endpoint requires a different role.
    #[error("role '{actual}' does not match required role '{required}'")]
    RoleMismatch {
        /// Role the endpoint demands.
        required: Role,
        /// Role carried by the token.
        actual: Role,
    },
    /// The token lacks a scope the endpoint demands.
    #[error("missing required scope '{required}'")]
    ScopeMissing {
        /// Scope the endpoint demands.
        required: Scope,
    },
    /// The caller exceeded the endpoint's request ceiling.
    #[error("rate limit exceeded, retry after {retry_after:?}")]
    RateLimited {
        /// Time until the current window resets.
        retry_after: Duration,
    },
}

impl AuthError {
    /// Short stable label used as the `reason` field in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::TokenExpired => "token_expired",
            Self::TokenMalformed => "token_malformed",
            Self::TokenForged => "token_forged",
            Self::RoleMismatch { .. } => "role_mismatch",
            Self::ScopeMissing { .. } => "scope_missing",
            Self::RateLimited { .. } => "rate_limited",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => AppError::unauthenticated("Not authenticated"),
            AuthError::TokenExpired => AppError::new(ErrorKind::TokenExpired, "Token has expired"),
            AuthError::TokenMalformed | AuthError::TokenForged => {
                AppError::new(ErrorKind::InvalidToken, INVALID_TOKEN_MESSAGE)
            }
            AuthError::RoleMismatch { required, .. } => AppError::new(
                ErrorKind::RoleMismatch,
                format!("Insufficient permissions. Required role: {required}"),
            ),
            AuthError::ScopeMissing { required } => AppError::new(
                ErrorKind::ScopeMissing,
                format!("Insufficient permissions. Required scope: {required}"),
            ),
            AuthError::RateLimited { retry_after } => {
                AppError::rate_limited("Rate limit exceeded", retry_after)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forged_and_malformed_are_indistinguishable() {
        let forged = AppError::from(AuthError::TokenForged);
        let malformed = AppError::from(AuthError::TokenMalformed);
        assert_eq!(forged.kind, malformed.kind);
        assert_eq!(forged.message, malformed.message);
        assert_ne!(
            AuthError::TokenForged.reason(),
            AuthError::TokenMalformed.reason()
        );
    }

    #[test]
    fn test_expired_is_distinct_from_invalid() {
        let expired = AppError::from(AuthError::TokenExpired);
        let forged = AppError::from(AuthError::TokenForged);
        assert_ne!(expired.kind, forged.kind);
    }

    #[test]
    fn test_rate_limited_keeps_retry_hint() {
        let err = AppError::from(AuthError::RateLimited {
            retry_after: Duration::from_secs(42),
        });
        assert_eq!(err.kind, ErrorKind::RateLimit);
        assert_eq!(err.retry_after_seconds(), Some(42));
    }

    #[test]
    fn test_denials_name_the_requirement() {
        let err = AppError::from(AuthError::ScopeMissing {
            required: Scope::Delete,
        });
        assert_eq!(err.kind, ErrorKind::ScopeMissing);
        assert!(err.message.ends_with("delete"));

        let err = AppError::from(AuthError::RoleMismatch {
            required: Role::Admin,
            actual: Role::User,
        });
        assert_eq!(err.kind, ErrorKind::RoleMismatch);
        assert!(err.message.ends_with("admin"));
    }
}
