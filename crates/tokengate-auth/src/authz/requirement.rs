//! What an endpoint demands of a caller's claims.

use tokengate_entity::{Role, Scope};

/// A role requirement, a scope requirement, both, or neither.
///
/// `Requirement::AUTHENTICATED` demands nothing beyond a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirement {
    /// Exact role the caller must hold.
    pub role: Option<Role>,
    /// Scope the caller's token must carry.
    pub scope: Option<Scope>,
}

impl Requirement {
    /// Any validated token passes.
    pub const AUTHENTICATED: Self = Self {
        role: None,
        scope: None,
    };

    /// Requires exactly `role`.
    pub const fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            scope: None,
        }
    }

    /// Requires `scope` to be present in the token.
    pub const fn scope(scope: Scope) -> Self {
        Self {
            role: None,
            scope: Some(scope),
        }
    }

    /// Requires both `role` and `scope`.
    pub const fn role_and_scope(role: Role, scope: Scope) -> Self {
        Self {
            role: Some(role),
            scope: Some(scope),
        }
    }
}
