// Password hashing and verification service

use crate::auth::error::AuthError;

/// Password service for hashing and verification (bcrypt)
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Ten salt rounds
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// Verify a password against a stored hash.
    /// A malformed hash is an error, not a mismatch.
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// `hash_password` on the blocking thread pool
    pub async fn hash_password_blocking(&self, password: String) -> Result<String, AuthError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash_password(&password))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }

    /// `verify_password` on the blocking thread pool
    pub async fn verify_password_blocking(
        password: String,
        hash: String,
    ) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || Self::verify_password(&password, &hash))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}
