//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped with the defaults; startup warns when it is in use.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum username length accepted at registration.
    #[serde(default = "default_username_min")]
    pub username_min_length: usize,
    /// Administrator account created at startup when absent.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the administrator seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// Login email.
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

impl AuthConfig {
    /// Whether the signing secret is still the shipped placeholder.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            password_min_length: default_password_min(),
            username_min_length: default_username_min(),
            bootstrap_admin: None,
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_password_min() -> usize {
    6
}

fn default_username_min() -> usize {
    3
}
