// In-memory user stores for unit and endpoint tests

use axum::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::{
    error::AuthError,
    models::{NewUser, User, UserField},
    repository::UserStore,
};

/// User store kept in a vector, enforcing the same unique rules as the
/// users migration (non-empty username and email).
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one user whose hash matches no password
    pub fn with_user(username: &str, email: &str) -> Self {
        let user = User {
            id: 1,
            name: "Seeded User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "seeded".to_string(),
            created_at: Utc::now(),
        };
        Self {
            users: RwLock::new(vec![user]),
        }
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

fn field_value(user: &User, field: UserField) -> &str {
    match field {
        UserField::Name => &user.name,
        UserField::Username => &user.username,
        UserField::Email => &user.email,
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_field(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        let found = users.iter().find(|u| field_value(u, field) == value);
        Ok(found.cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        let unique = [
            (UserField::Username, &user.username),
            (UserField::Email, &user.email),
        ];
        for (field, value) in unique {
            let taken = users.iter().any(|u| field_value(u, field) == value);
            if !value.is_empty() && taken {
                return Err(AuthError::Duplicate(field));
            }
        }

        let created = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }
}

fn refused() -> AuthError {
    AuthError::StoreUnavailable("connection refused".to_string())
}

/// Store whose every call fails, for exercising internal-error paths
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_field(
        &self,
        _field: UserField,
        _value: &str,
    ) -> Result<Option<User>, AuthError> {
        Err(refused())
    }

    async fn create_user(&self, _user: &NewUser) -> Result<User, AuthError> {
        Err(refused())
    }
}

/// Store that never sees existing users on lookup but rejects duplicates on
/// insert, as when a concurrent signup wins the race after the pre-check.
#[derive(Default)]
pub struct RacingUserStore {
    inner: MemoryUserStore,
}

impl RacingUserStore {
    pub fn with_user(username: &str, email: &str) -> Self {
        Self {
            inner: MemoryUserStore::with_user(username, email),
        }
    }
}

#[async_trait]
impl UserStore for RacingUserStore {
    async fn find_by_field(
        &self,
        _field: UserField,
        _value: &str,
    ) -> Result<Option<User>, AuthError> {
        Ok(None)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, AuthError> {
        self.inner.create_user(user).await
    }
}
