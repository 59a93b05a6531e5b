// Authentication error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::auth::models::{FieldErrors, UserField};
use crate::auth::uniqueness::unavailable_message;

/// Why a signin was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownEmail,
    WrongPassword,
}

impl CredentialFailure {
    /// Client-facing message. The two cases are deliberately distinguishable.
    pub fn message(&self) -> &'static str {
        match self {
            CredentialFailure::UnknownEmail => "Invalid Email",
            CredentialFailure::WrongPassword => "Invalid Password",
        }
    }
}

impl std::fmt::Display for CredentialFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Insert hit a unique index that the pre-check did not see
    #[error("{0} already taken")]
    Duplicate(UserField),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(CredentialFailure),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("token generation error: {0}")]
    TokenGeneration(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    ///
    /// Field and credential errors answer 200 with an `errors` payload; the
    /// client reads the body, not the status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::OK,
            AuthError::Duplicate(_) => StatusCode::OK,
            AuthError::InvalidCredentials(_) => StatusCode::OK,
            AuthError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `errors` map sent to the client, for errors that carry one
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors.clone()),
            AuthError::Duplicate(field) => Some(FieldErrors::single(
                field.as_str(),
                unavailable_message(*field),
            )),
            AuthError::InvalidCredentials(failure) => {
                Some(FieldErrors::single("invalidCredentials", failure.message()))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Some(errors) = self.field_errors() {
            debug!("Rejected auth request: {}", self);
            return (status, Json(json!({ "errors": errors }))).into_response();
        }

        let message = match &self {
            AuthError::MalformedBody(msg) => {
                debug!("Malformed request body: {}", msg);
                msg.clone()
            }
            AuthError::InvalidToken => {
                warn!("Invalid token attempt");
                "Invalid token".to_string()
            }
            AuthError::ExpiredToken => {
                warn!("Expired token attempt");
                "Token has expired".to_string()
            }
            other => {
                error!("Internal auth error: {}", other);
                "Internal server error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
