//! Unified error handling.
//!
//! Provides a unified `AppError` type over every store's errors. Front ends
//! show [`AppError::user_message`] to the shopper and log the full error.

use premium_core::EmailError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistence failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login, signup or profile update failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout refused a step.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog lookup or loading failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Newsletter signup was given a malformed address.
    #[error("Newsletter error: {0}")]
    Newsletter(#[from] EmailError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Whether the error comes from the environment rather than the shopper.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Config(_)
                | Self::Catalog(CatalogError::Io { .. } | CatalogError::Parse { .. })
        )
    }

    /// Message safe to show the shopper.
    ///
    /// Storage and file details are replaced with a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        // Don't expose internal error details to shoppers
        match self {
            Self::Storage(_) => "Something went wrong saving your data".to_string(),
            Self::Config(err) => err.to_string(),
            Self::Catalog(CatalogError::NotFound(id)) => format!("Product {id} not found"),
            Self::Catalog(_) => "The product catalog is unavailable".to_string(),
            Self::Newsletter(_) => "Invalid email address".to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::PasswordMismatch => "Passwords do not match".to_string(),
                AuthError::NotAuthenticated => "Please log in first".to_string(),
            },
            Self::Checkout(err) => {
                let message = err.to_string();
                let mut chars = message.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            }
            Self::NotFound(what) => format!("{what} not found"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::checkout::Field;

    #[test]
    fn test_storage_details_hidden() {
        let err = AppError::from(StorageError::Unavailable("disk on fire at /var/x".to_string()));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("/var/x"));
    }

    #[test]
    fn test_checkout_message_capitalized() {
        let err = AppError::from(CheckoutError::MissingField(Field::Address1));
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Please provide address line 1");
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::from(CatalogError::NotFound("p9".into()));
        assert_eq!(err.user_message(), "Product p9 not found");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_newsletter_error_is_not_auth() {
        let err = AppError::from(EmailError::MissingAtSymbol);
        assert!(matches!(err, AppError::Newsletter(_)));
        assert!(!err.is_internal());
        assert_eq!(err.user_message(), "Invalid email address");
    }

    #[test]
    fn test_auth_messages() {
        assert_eq!(
            AppError::from(AuthError::PasswordMismatch).user_message(),
            "Passwords do not match"
        );
    }
}
