//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tokengate_auth::{
    AuthorizationEngine, PasswordHasher, PasswordValidator, RateLimiter, TokenService,
};
use tokengate_core::config::AppConfig;
use tokengate_core::traits::{Clock, Repository};
use tokengate_database::{ProductRepository, UserRepository};
use tokengate_entity::Product;
use tokengate_service::{AdminUserService, AuthService, ProductService};
use uuid::Uuid;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Time source for token expiry and rate windows
    pub clock: Arc<dyn Clock>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token issuance and validation
    pub tokens: Arc<TokenService>,
    /// Role and scope decisions
    pub authz: Arc<AuthorizationEngine>,
    /// Per-caller, per-endpoint admission
    pub rate_limiter: Arc<RateLimiter>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Product repository
    pub product_repo: Arc<ProductRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, and identity
    pub auth_service: Arc<AuthService>,
    /// Product catalogue
    pub product_service: Arc<ProductService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
}

impl AppState {
    /// Wires every component from configuration around the given clock.
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let tokens = Arc::new(TokenService::new(&config.auth.jwt_secret, Arc::clone(&clock)));
        let authz = Arc::new(AuthorizationEngine::new());
        let rate_limiter = Arc::new(RateLimiter::new(Arc::clone(&clock)));

        let user_repo = Arc::new(UserRepository::new());
        let product_repo = Arc::new(ProductRepository::new());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::clone(&tokens),
            Arc::clone(&clock),
        ));
        let product_store: Arc<dyn Repository<Product, Uuid>> = product_repo.clone();
        let product_service = Arc::new(ProductService::new(
            product_store,
            Arc::clone(&authz),
            Arc::clone(&clock),
        ));
        let admin_user_service = Arc::new(AdminUserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&authz),
        ));

        Self {
            config: Arc::new(config),
            clock,
            tokens,
            authz,
            rate_limiter,
            user_repo,
            product_repo,
            auth_service,
            product_service,
            admin_user_service,
        }
    }
}
