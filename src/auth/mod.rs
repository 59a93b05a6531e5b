// Authentication module
// Signup validation, identity uniqueness checks, password hashing and bearer token issuance

pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod uniqueness;
pub mod validation;

// Re-export commonly used types
pub use error::{AuthError, CredentialFailure};
pub use handlers::{signin_handler, signup_handler, validate_handler};
pub use models::{
    ErrorsResponse, FieldErrors, ProbeRequest, SigninRequest, SignupRequest, SuccessResponse,
    TokenResponse, User, UserField,
};
pub use repository::{PgUserStore, UserStore};
pub use service::AuthService;
