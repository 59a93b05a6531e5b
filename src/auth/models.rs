// Identity records, request/response DTOs and the field error set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// User database model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted; the store assigns `id` and `created_at`
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// User columns that can be checked for availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    Name,
    Username,
    Email,
}

impl UserField {
    pub const ALL: [UserField; 3] = [UserField::Name, UserField::Username, UserField::Email];

    /// Column name, also the field name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Username => "username",
            UserField::Email => "email",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a valid field")]
pub struct UnknownField(pub String);

impl FromStr for UserField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Field name to human-readable message. A present key means that field failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Later entries win on key collision
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Reads a string field, treating JSON `null` like an absent field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Availability check request DTO
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProbeRequest {
    #[schema(example = "username")]
    #[serde(deserialize_with = "null_as_empty")]
    pub field: String,
    #[schema(example = "alice")]
    #[serde(deserialize_with = "null_as_empty")]
    pub value: String,
}

/// Registration request DTO. Missing fields read as empty strings.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Alice Liddell")]
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[schema(example = "alice")]
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub confirm_password: String,
}

/// Login request DTO
///
/// `username` is accepted for client compatibility; signin resolves by email only.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct SigninRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,
    #[validate(length(min = 1, message = "This field is required"))]
    #[schema(example = "alice@example.com")]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// `{"success": "success"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = "success")]
    pub success: String,
}

impl SuccessResponse {
    pub fn new() -> Self {
        Self {
            success: "success".to_string(),
        }
    }
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe answer: either the value is free or the field carries an error
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProbeResponse {
    Available(SuccessResponse),
    Unavailable { error: FieldErrors },
}

impl ProbeResponse {
    pub fn unavailable(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProbeResponse::Unavailable {
            error: FieldErrors::single(field, message),
        }
    }
}

/// Field errors payload, `{"errors": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorsResponse {
    pub errors: FieldErrors,
}

/// Successful signin payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    #[schema(example = "success")]
    pub success: String,
}

impl TokenResponse {
    pub fn new(token: String) -> Self {
        Self {
            token,
            success: "success".to_string(),
        }
    }
}
