// JWT token issuing and validation service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: i64, // issued at timestamp
    /// Only present when the service is configured with an expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Token service for JWT operations
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiry_seconds: Option<i64>,
}

impl TokenService {
    /// Tokens issued by this service never expire
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiry_seconds: None,
        }
    }

    /// Embed and enforce an `exp` claim `seconds` after issue
    pub fn with_expiry(mut self, seconds: Option<i64>) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Sign `{id, username}` claims with the server secret (HS256)
    pub fn issue(&self, id: i32, username: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            id,
            username: username.to_string(),
            iat: now,
            exp: self.expiry_seconds.map(|seconds| now + seconds),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Check signature (and expiry, when configured) and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        if self.expiry_seconds.is_none() {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}
