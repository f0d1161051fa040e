//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login, signup and profile updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] premium_core::EmailError),

    /// Signup password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The action needs a logged-in shopper.
    #[error("not logged in")]
    NotAuthenticated,
}
