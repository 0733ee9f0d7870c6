//! Registration credential policy.

use tokengate_core::config::AuthConfig;
use tokengate_core::error::AppError;

/// Enforces the configured minimum lengths for new credentials.
///
/// Lengths count characters, not bytes.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    password_min_length: usize,
    username_min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            password_min_length: config.password_min_length,
            username_min_length: config.username_min_length,
        }
    }

    /// Validates a new password.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.password_min_length
            )));
        }
        Ok(())
    }

    /// Validates a new username. Surrounding whitespace does not count.
    pub fn validate_username(&self, username: &str) -> Result<(), AppError> {
        if username.trim().chars().count() < self.username_min_length {
            return Err(AppError::validation(format!(
                "Username must be at least {} characters long",
                self.username_min_length
            )));
        }
        Ok(())
    }
}
