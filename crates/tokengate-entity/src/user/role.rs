//! User role enumeration and the role → scope contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::scope::Scope;

const GUEST_SCOPES: &[Scope] = &[Scope::Read];
const USER_SCOPES: &[Scope] = &[Scope::Read, Scope::Write];
const ADMIN_SCOPES: &[Scope] = &[Scope::Read, Scope::Write, Scope::Delete, Scope::Admin];

/// Identity classes. There is no hierarchy between roles; capabilities come
/// only from [`role_to_scopes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only visitor.
    Guest,
    /// Regular registered user.
    #[default]
    User,
    /// Administrator.
    Admin,
}

/// Scopes granted to a role, in canonical order.
///
/// This table is the only place scopes are derived from; user records never
/// store scopes. Changing it is a breaking change for API clients.
pub fn role_to_scopes(role: Role) -> &'static [Scope] {
    match role {
        Role::Guest => GUEST_SCOPES,
        Role::User => USER_SCOPES,
        Role::Admin => ADMIN_SCOPES,
    }
}

impl Role {
    /// Scopes granted to this role.
    pub fn scopes(&self) -> &'static [Scope] {
        role_to_scopes(*self)
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = tokengate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(tokengate_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: guest, user, admin"
            ))),
        }
    }
}
