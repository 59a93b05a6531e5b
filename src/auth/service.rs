// Authentication service - business logic layer

use std::sync::Arc;
use validator::Validate;

use crate::auth::{
    error::{AuthError, CredentialFailure},
    models::{NewUser, SigninRequest, SignupRequest, User, UserField},
    password::PasswordService,
    repository::UserStore,
    token::TokenService,
    uniqueness::{UniquenessCheck, UniquenessChecker},
    validation::{field_errors_from, SignupValidator},
};

/// A successful signin
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: String,
    pub user: User,
}

/// Authentication service coordinating all auth operations
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    checker: UniquenessChecker,
    validator: SignupValidator,
    password_service: PasswordService,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        store: Arc<dyn UserStore>,
        password_service: PasswordService,
        token_service: TokenService,
        min_password_length: usize,
    ) -> Self {
        let checker = UniquenessChecker::new(store.clone());
        let validator = SignupValidator::new(checker.clone(), min_password_length);
        Self {
            store,
            checker,
            validator,
            password_service,
            token_service,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Report whether `value` is free for `field`
    pub async fn check_availability(
        &self,
        field: UserField,
        value: &str,
    ) -> Result<UniquenessCheck, AuthError> {
        self.checker.check(field, value).await
    }

    /// Register a new user
    ///
    /// This method:
    /// 1. Runs every signup rule and fails with the full error set
    /// 2. Hashes the password
    /// 3. Inserts the user; a unique index hit is reported like a failed pre-check
    pub async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        // 1. Validate
        let errors = self.validator.validate(&request).await?;
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        // 2. Hash
        let password_hash = self
            .password_service
            .hash_password_blocking(request.password)
            .await?;

        // 3. Insert
        let new_user = NewUser {
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash,
        };
        let user = self.store.create_user(&new_user).await.map_err(|e| {
            if let AuthError::Duplicate(field) = &e {
                tracing::warn!("Signup lost uniqueness race on {}", field);
            }
            e
        })?;

        tracing::info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Login a user by email and password
    pub async fn signin(&self, request: SigninRequest) -> Result<SignedIn, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(field_errors_from(&e)))?;

        let user = self
            .store
            .find_by_field(UserField::Email, &request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials(
                CredentialFailure::UnknownEmail,
            ))?;

        let matched =
            PasswordService::verify_password_blocking(request.password, user.password_hash.clone())
                .await?;
        if !matched {
            return Err(AuthError::InvalidCredentials(
                CredentialFailure::WrongPassword,
            ));
        }

        let token = self.token_service.issue(user.id, &user.username)?;

        tracing::info!("User {} signed in", user.id);
        Ok(SignedIn { token, user })
    }
}
