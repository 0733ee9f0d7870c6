//! Admin user management: listing, deletion, and elevation.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use tokengate_auth::{AuthorizationEngine, Requirement};
use tokengate_core::error::AppError;
use tokengate_core::traits::Repository;
use tokengate_database::UserRepository;
use tokengate_entity::{Role, Scope, User};

use crate::context::RequestContext;

/// Most users returned by a listing.
pub const MAX_LIST: usize = 100;

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    authz: Arc<AuthorizationEngine>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, authz: Arc<AuthorizationEngine>) -> Self {
        Self { user_repo, authz }
    }

    /// Lists users, oldest first. Requires the `admin` role.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::role(Role::Admin))?;
        self.user_repo.find_all(MAX_LIST).await
    }

    /// Deletes a user. Requires the `admin` role.
    ///
    /// Tokens already issued to the deleted user stay valid until expiry but
    /// no longer resolve to an identity.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::role(Role::Admin))?;

        if !self.user_repo.delete(&user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %ctx.user_id(), client = %ctx.client, user_id = %user_id, "User deleted by admin");

        Ok(())
    }

    /// Promotes a user to `admin`. Requires the `admin` scope in the
    /// caller's own token.
    ///
    /// Tokens the target already holds keep their old scopes until it logs
    /// in again.
    pub async fn elevate(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.authz
            .require(&ctx.claims, &Requirement::scope(Scope::Admin))?;

        let user = self
            .user_repo
            .update_role(user_id, Role::Admin)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(admin_id = %ctx.user_id(), client = %ctx.client, user_id = %user_id, "User elevated to admin");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokengate_auth::Claims;
    use tokengate_core::error::ErrorKind;
    use tokengate_entity::role_to_scopes;

    use super::*;

    fn ctx(role: Role) -> RequestContext {
        let claims = Claims {
            sub: Uuid::new_v4(),
            role,
            scopes: role_to_scopes(role).to_vec(),
            iat: 0,
            exp: i64::MAX,
        };
        RequestContext::new(claims, "127.0.0.1")
    }

    async fn setup() -> (AdminUserService, User) {
        let repo = Arc::new(UserRepository::new());
        let user = repo
            .insert(&User::new("a@example.com", "alice", "hash", Role::User, Utc::now()))
            .await
            .unwrap();
        (
            AdminUserService::new(repo, Arc::new(AuthorizationEngine::new())),
            user,
        )
    }

    #[tokio::test]
    async fn test_admin_lists_users() {
        let (svc, user) = setup().await;
        let users = svc.list_users(&ctx(Role::Admin)).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, user.id);
    }

    #[tokio::test]
    async fn test_non_admin_role_mismatch() {
        let (svc, user) = setup().await;
        let err = svc.list_users(&ctx(Role::User)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RoleMismatch);
        let err = svc.delete_user(&ctx(Role::Guest), user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RoleMismatch);
    }

    #[tokio::test]
    async fn test_elevation_needs_admin_scope() {
        let (svc, user) = setup().await;
        let err = svc.elevate(&ctx(Role::User), user.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ScopeMissing);

        let elevated = svc.elevate(&ctx(Role::Admin), user.id).await.unwrap();
        assert_eq!(elevated.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let (svc, _) = setup().await;
        let admin = ctx(Role::Admin);
        assert_eq!(
            svc.elevate(&admin, Uuid::new_v4()).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            svc.delete_user(&admin, Uuid::new_v4()).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_delete_removes_user() {
        let (svc, user) = setup().await;
        let admin = ctx(Role::Admin);
        svc.delete_user(&admin, user.id).await.unwrap();
        assert!(svc.list_users(&admin).await.unwrap().is_empty());
    }
}
