//! User repository implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_core::traits::Repository;
use tokengate_entity::{Role, User};

/// Credential store for user records.
///
/// Emails are unique compared case-insensitively; uniqueness is enforced
/// atomically through a secondary index so concurrent registrations of the
/// same address cannot both succeed.
#[derive(Debug, Default)]
pub struct UserRepository {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserRepository {
    /// Create an empty user repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user by login identifier (email, case-insensitive).
    pub async fn find_by_identifier(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&email_key(email)).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    /// Whether an account with this email exists.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.emails.contains_key(&email_key(email)))
    }

    /// Insert a new user. Fails with a conflict if the email is taken.
    pub async fn insert(&self, user: &User) -> AppResult<User> {
        match self.emails.entry(email_key(&user.email)) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already registered")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                debug!(user_id = %user.id, "User stored");
                Ok(user.clone())
            }
        }
    }

    /// Change a user's role. Returns the updated record, or `None` if absent.
    pub async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Option<User>> {
        Ok(self.users.get_mut(&id).map(|mut user| {
            user.role = role;
            user.clone()
        }))
    }
}

#[async_trait]
impl Repository<User, Uuid> for UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(id).map(|user| user.clone()))
    }

    async fn find_all(&self, limit: usize) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|user| user.clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        users.truncate(limit);
        Ok(users)
    }

    async fn create(&self, entity: &User) -> AppResult<User> {
        self.insert(entity).await
    }

    async fn update(&self, entity: &User) -> AppResult<User> {
        let Some(mut stored) = self.users.get_mut(&entity.id) else {
            return Err(AppError::not_found("User not found"));
        };
        if email_key(&stored.email) != email_key(&entity.email) {
            return Err(AppError::validation("Email cannot be changed"));
        }
        *stored = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        match self.users.remove(id) {
            Some((_, user)) => {
                self.emails.remove(&email_key(&user.email));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use tokengate_core::error::ErrorKind;

    use super::*;

    fn user(email: &str, role: Role) -> User {
        User::new(email, "someone", "hash", role, Utc::now())
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let repo = UserRepository::new();
        let stored = repo.insert(&user("Alice@Example.com", Role::User)).await.unwrap();

        let found = repo.find_by_identifier("alice@example.COM").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(stored.id));
        assert!(repo.find_by_identifier("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = UserRepository::new();
        repo.insert(&user("a@example.com", Role::User)).await.unwrap();
        let err = repo
            .insert(&user("A@EXAMPLE.com", Role::Guest))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_of_one_email() {
        let repo = Arc::new(UserRepository::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&user("race@example.com", Role::User)).await.is_ok()
            }));
        }
        let mut wins = 0;
        for handle in handles {
            if handle.await.unwrap() {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_update_role_and_delete() {
        let repo = UserRepository::new();
        let stored = repo.insert(&user("a@example.com", Role::User)).await.unwrap();

        let updated = repo.update_role(stored.id, Role::Admin).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert!(repo.update_role(Uuid::new_v4(), Role::Admin).await.unwrap().is_none());

        assert!(repo.delete(&stored.id).await.unwrap());
        assert!(!repo.delete(&stored.id).await.unwrap());
        assert!(!repo.email_exists("a@example.com").await.unwrap());
        repo.insert(&user("a@example.com", Role::User)).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_all_is_oldest_first_and_limited() {
        let repo = UserRepository::new();
        let now = Utc::now();
        for i in 0..5 {
            let mut u = user(&format!("u{i}@example.com"), Role::User);
            u.created_at = now - Duration::seconds(i);
            repo.insert(&u).await.unwrap();
        }
        let users = repo.find_all(3).await.unwrap();
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].email, "u4@example.com");
        assert!(users.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }
}
