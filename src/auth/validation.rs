// Signup validation: field format rules plus uniqueness checks

use regex::Regex;
use std::sync::OnceLock;

use crate::auth::{
    error::AuthError,
    models::{FieldErrors, SignupRequest, UserField},
    uniqueness::UniquenessChecker,
};

const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let build = || Regex::new(EMAIL_PATTERN).expect("valid email regex");
    EMAIL.get_or_init(build)
}

/// Validates that an email has the usual `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Convert validator-derive errors into the flat field error set,
/// keeping the first message per field.
pub fn field_errors_from(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            fields.insert(field, message);
        }
    }
    fields
}

/// Applies the signup rules. Every rule runs so that all errors surface together.
#[derive(Clone)]
pub struct SignupValidator {
    checker: UniquenessChecker,
    min_password_length: usize,
}

impl SignupValidator {
    /// `min_password_length` of 0 disables the length rule
    pub fn new(checker: UniquenessChecker, min_password_length: usize) -> Self {
        Self {
            checker,
            min_password_length,
        }
    }

    /// Returns an empty set when the request is valid.
    /// Store failures during the uniqueness checks are errors, not field errors.
    pub async fn validate(&self, request: &SignupRequest) -> Result<FieldErrors, AuthError> {
        let mut errors = self.check_format(request);

        if !request.username.is_empty() {
            let check = self
                .checker
                .check(UserField::Username, &request.username)
                .await?;
            errors.merge(check.into_errors());
        }
        if !request.email.is_empty() {
            let check = self.checker.check(UserField::Email, &request.email).await?;
            errors.merge(check.into_errors());
        }

        Ok(errors)
    }

    /// The rules that need no store access
    pub fn check_format(&self, request: &SignupRequest) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if !request.email.is_empty() && !is_valid_email(&request.email) {
            errors.insert("email", "Not a valid Email");
        }
        if !request.password.is_empty()
            && request.password.chars().count() < self.min_password_length
        {
            errors.insert("password", "Password too short");
        }
        if !request.confirm_password.is_empty() && request.confirm_password != request.password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        errors
    }
}
