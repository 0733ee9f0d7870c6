//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tokengate_entity::{Role, Scope, User};

/// Plain acknowledgement naming the affected user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessageResponse {
    /// Human-readable message.
    pub message: String,
    /// Affected user.
    pub user_id: Uuid,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Authenticated user.
    pub user_id: Uuid,
    /// Role embedded in the token.
    pub role: Role,
    /// Scopes embedded in the token.
    pub scopes: Vec<Scope>,
}

/// Current identity. Role and scopes are the ones carried by the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Role from the token.
    pub role: Role,
    /// Scopes from the token.
    pub scopes: Vec<Scope>,
}

/// User as listed to admins. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Current stored role.
    pub role: Role,
    /// Scopes the stored role grants.
    pub scopes: Vec<Scope>,
    /// Whether the account can log in.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            scopes: user.scopes().to_vec(),
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Service banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    /// Service name.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// Liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}
