//! Permission scopes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An atomic capability carried in a token.
///
/// Declaration order is the canonical order used when a role's scopes are
/// listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// List and read resources.
    Read,
    /// Create and update resources.
    Write,
    /// Delete resources.
    Delete,
    /// Administrative operations such as elevation.
    Admin,
}

impl Scope {
    /// Return the scope as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scope {
    type Err = tokengate_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "delete" => Ok(Self::Delete),
            "admin" => Ok(Self::Admin),
            _ => Err(tokengate_core::AppError::validation(format!(
                "Invalid scope: '{s}'. Expected one of: read, write, delete, admin"
            ))),
        }
    }
}
