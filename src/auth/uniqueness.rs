// Uniqueness checker for user identity fields

use serde::Serialize;
use std::sync::Arc;

use crate::auth::{
    error::AuthError,
    models::{FieldErrors, UserField},
    repository::UserStore,
};

/// Message reported when a value is already taken
pub fn unavailable_message(field: UserField) -> String {
    format!("This {} is not available", field)
}

/// Result of a single availability lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniquenessCheck {
    pub field: UserField,
    pub is_unique: bool,
    pub message: String,
}

impl UniquenessCheck {
    /// Field errors to merge into a signup error set; empty when unique
    pub fn into_errors(self) -> FieldErrors {
        if self.is_unique {
            FieldErrors::new()
        } else {
            FieldErrors::single(self.field.as_str(), self.message)
        }
    }
}

/// Reports whether a field value is already used by some identity record
#[derive(Clone)]
pub struct UniquenessChecker {
    store: Arc<dyn UserStore>,
}

impl UniquenessChecker {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn check(&self, field: UserField, value: &str) -> Result<UniquenessCheck, AuthError> {
        let existing = self.store.find_by_field(field, value).await?;

        let check = match existing {
            Some(_) => UniquenessCheck {
                field,
                is_unique: false,
                message: unavailable_message(field),
            },
            None => UniquenessCheck {
                field,
                is_unique: true,
                message: String::new(),
            },
        };

        tracing::debug!("Uniqueness check on {}: unique={}", field, check.is_unique);
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingUserStore, MemoryUserStore};
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_free_value_is_unique() {
        let checker = UniquenessChecker::new(Arc::new(MemoryUserStore::new()));

        let check = checker.check(UserField::Username, "alice").await.unwrap();
        assert!(check.is_unique);
        assert_eq!(check.message, "");
        assert!(check.into_errors().is_empty());
    }

    #[tokio::test]
    async fn test_taken_value_is_reported() {
        let store = MemoryUserStore::with_user("alice", "alice@x.com");
        let checker = UniquenessChecker::new(Arc::new(store));

        let check = checker
            .check(UserField::Email, "alice@x.com")
            .await
            .unwrap();
        assert!(!check.is_unique);
        assert_eq!(check.message, "This email is not available");

        let errors = check.into_errors();
        assert_eq!(errors.get("email"), Some("This email is not available"));
    }

    #[tokio::test]
    async fn test_repeated_check_is_stable() {
        let checker = UniquenessChecker::new(Arc::new(MemoryUserStore::new()));

        let first = checker.check(UserField::Username, "nobody").await.unwrap();
        let second = checker.check(UserField::Username, "nobody").await.unwrap();
        assert!(first.is_unique);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let checker = UniquenessChecker::new(Arc::new(FailingUserStore));

        let err = checker
            .check(UserField::Username, "alice")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
    }

    proptest! {
        #[test]
        fn prop_existing_values_are_never_unique(
            username in "[a-z]{3,12}",
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let store = MemoryUserStore::with_user(&username, &email);
            let checker = UniquenessChecker::new(Arc::new(store));

            let by_username = rt.block_on(checker.check(UserField::Username, &username))?;
            let by_email = rt.block_on(checker.check(UserField::Email, &email))?;
            prop_assert!(!by_username.is_unique);
            prop_assert!(!by_email.is_unique);
        }
    }
}
