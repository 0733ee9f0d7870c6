//! Authorization decisions over validated claims.

use tracing::warn;

use tokengate_entity::{Role, Scope};

use super::requirement::Requirement;
use crate::error::AuthError;
use crate::token::Claims;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The claims satisfy the requirement.
    Allow,
    /// The claims fail the requirement.
    Deny(DenyReason),
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Wrong identity class.
    RoleMismatch {
        /// Role the endpoint demands.
        required: Role,
        /// Role carried by the token.
        actual: Role,
    },
    /// Right identity class, missing capability.
    ScopeMissing {
        /// Scope the endpoint demands.
        required: Scope,
    },
}

impl From<DenyReason> for AuthError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::RoleMismatch { required, actual } => {
                AuthError::RoleMismatch { required, actual }
            }
            DenyReason::ScopeMissing { required } => AuthError::ScopeMissing { required },
        }
    }
}

/// Decides whether validated claims meet an endpoint's requirement.
///
/// Roles match exactly; there is no hierarchy, so an admin-role endpoint is
/// closed to everyone but admins and a scope endpoint is open to any role
/// whose token carries the scope. Checks are pure and do no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationEngine;

impl AuthorizationEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `requirement` against `claims`.
    ///
    /// When both checks fail the role mismatch is reported.
    pub fn authorize(&self, claims: &Claims, requirement: &Requirement) -> Decision {
        if let Some(required) = requirement.role {
            if claims.role != required {
                return Decision::Deny(DenyReason::RoleMismatch {
                    required,
                    actual: claims.role,
                });
            }
        }

        if let Some(required) = requirement.scope {
            if !claims.has_scope(required) {
                return Decision::Deny(DenyReason::ScopeMissing { required });
            }
        }

        Decision::Allow
    }

    /// Like [`authorize`](Self::authorize) but as a `Result` for `?` use.
    pub fn require(&self, claims: &Claims, requirement: &Requirement) -> Result<(), AuthError> {
        match self.authorize(claims, requirement) {
            Decision::Allow => Ok(()),
            Decision::Deny(deny) => {
                let err = AuthError::from(deny);
                warn!(user_id = %claims.sub, reason = err.reason(), ?deny, "Authorization denied");
                Err(err)
            }
        }
    }
}
