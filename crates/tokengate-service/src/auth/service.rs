//! Account registration, credential exchange, and identity lookup.

use std::sync::Arc;

use tracing::{info, warn};

use tokengate_auth::{IssuedToken, PasswordHasher, PasswordValidator, TokenService};
use tokengate_core::config::BootstrapAdmin;
use tokengate_core::error::{AppError, ErrorKind};
use tokengate_core::traits::{Clock, Repository};
use tokengate_database::UserRepository;
use tokengate_entity::{Role, User};

use crate::context::RequestContext;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Data for a self-service registration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterUser {
    /// Login email.
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role; `user` when absent.
    pub role: Option<Role>,
}

/// A successful login: the user and the token minted for it.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Freshly issued access token.
    pub token: IssuedToken,
}

/// Handles registration, login, and "who am I".
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    tokens: Arc<TokenService>,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        tokens: Arc<TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            tokens,
            clock,
        }
    }

    /// Registers a new account.
    ///
    /// Only `guest` and `user` may be requested; admins come from elevation
    /// or the bootstrap account.
    pub async fn register(&self, req: RegisterUser) -> Result<User, AppError> {
        let role = req.role.unwrap_or_default();
        if role == Role::Admin {
            return Err(AppError::validation(
                "Admin accounts cannot be self-registered",
            ));
        }

        self.validator.validate_username(&req.username)?;
        self.validator.validate(&req.password)?;

        if self.user_repo.email_exists(&req.email).await? {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = User::new(
            req.email.trim(),
            req.username.trim(),
            password_hash,
            role,
            self.clock.now(),
        );
        let user = self.user_repo.insert(&user).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(user)
    }

    /// Exchanges an email/password pair for an access token.
    ///
    /// Unknown email, wrong password, and inactive accounts all fail with the
    /// same message.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(user) = self.user_repo.find_by_identifier(email).await? else {
            warn!(reason = "unknown_email", "Login failed");
            return Err(AppError::invalid_credentials(BAD_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, reason = "wrong_password", "Login failed");
            return Err(AppError::invalid_credentials(BAD_CREDENTIALS));
        }

        if !user.is_active {
            warn!(user_id = %user.id, reason = "inactive", "Login failed");
            return Err(AppError::invalid_credentials(BAD_CREDENTIALS));
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginOutcome { user, token })
    }

    /// Loads the stored record of the caller.
    ///
    /// A valid token whose subject has since been deleted is a bad
    /// credential, not a missing one.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(&ctx.user_id())
            .await?
            .ok_or_else(|| AppError::new(ErrorKind::InvalidToken, "User not found"))
    }

    /// Creates the configured administrator if no account uses its email.
    ///
    /// Returns the new user, or `None` when the email is already taken.
    pub async fn ensure_bootstrap_admin(
        &self,
        admin: &BootstrapAdmin,
    ) -> Result<Option<User>, AppError> {
        if let Some(existing) = self.user_repo.find_by_identifier(&admin.email).await? {
            if existing.role != Role::Admin {
                warn!(
                    user_id = %existing.id,
                    "Bootstrap admin email belongs to a non-admin account; leaving it unchanged"
                );
            }
            return Ok(None);
        }

        self.validator.validate(&admin.password)?;
        let password_hash = self.hasher.hash_password(&admin.password)?;
        let user = User::new(
            admin.email.trim(),
            admin.username.trim(),
            password_hash,
            Role::Admin,
            self.clock.now(),
        );
        let user = self.user_repo.insert(&user).await?;

        info!(user_id = %user.id, "Bootstrap admin created");

        Ok(Some(user))
    }
}
