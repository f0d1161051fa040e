//! Display-only authentication.
//!
//! Logging in stores a shopper profile in durable storage and marks it as the
//! active session profile. No credential is checked and the token is a
//! marker derived from the email: this is a demo login, not a security
//! mechanism.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use premium_core::{Email, Gender};

use crate::models::UserProfile;
use crate::models::session::keys;
use crate::storage::{self, KeyValueStore, StorageError};

/// Fields collected by the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: String,
    /// Display name; the email's local part is used when absent or blank.
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
}

/// Fields collected by the signup form.
///
/// The passwords are only compared with each other and then dropped.
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
}

/// A partial profile edit. Present fields replace the stored ones.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
}

/// Holds the active shopper profile and mirrors it to durable storage.
#[derive(Debug)]
pub struct AuthStore {
    storage: Arc<dyn KeyValueStore>,
    user: Option<UserProfile>,
}

impl AuthStore {
    /// Create a store with no active profile.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            user: None,
        }
    }

    /// Read the persisted profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    pub fn load(storage: &dyn KeyValueStore) -> Result<Option<UserProfile>, StorageError> {
        storage::load_json(storage, keys::AUTH)
    }

    /// Create a store and restore the persisted profile.
    ///
    /// An unreadable or corrupt record is logged and treated as logged out.
    #[must_use]
    pub fn hydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let user = Self::load(storage.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable auth record");
            None
        });
        if let Some(profile) = &user {
            tracing::info!(email = %profile.email, "Restored logged-in shopper");
        }
        Self { storage, user }
    }

    /// The active profile, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Log in and persist the new profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email does not parse; the
    /// previous session is left untouched.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn login(
        &mut self,
        request: LoginRequest,
        now: DateTime<Utc>,
    ) -> Result<&UserProfile, AuthError> {
        let email = Email::parse(&request.email)?;
        let name = request
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.local_part().to_string());

        let profile = UserProfile {
            name,
            token: UserProfile::display_token(&email),
            email,
            gender: request.gender,
            age: request.age,
            logged_at: now,
        };
        self.persist(&profile);
        tracing::info!("Shopper logged in");
        Ok(self.user.insert(profile))
    }

    /// Create an account and log in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the passwords differ, or
    /// `AuthError::InvalidEmail` if the email does not parse.
    pub fn signup(
        &mut self,
        request: SignupRequest,
        now: DateTime<Utc>,
    ) -> Result<&UserProfile, AuthError> {
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        self.login(
            LoginRequest {
                email: request.email,
                name: Some(request.name),
                gender: request.gender,
                age: request.age,
            },
            now,
        )
    }

    /// Clear the active profile and its persisted record.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.remove(keys::AUTH) {
            tracing::error!(error = %e, "Failed to remove auth record");
        }
        if self.user.take().is_some() {
            tracing::info!("Shopper logged out");
        }
    }

    /// Merge present fields into the active profile and persist it.
    ///
    /// A changed email re-derives the display token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is logged in, or
    /// `AuthError::InvalidEmail` if a new email does not parse. Nothing
    /// changes in either case.
    pub fn update_user(&mut self, update: ProfileUpdate) -> Result<&UserProfile, AuthError> {
        let Some(current) = &self.user else {
            return Err(AuthError::NotAuthenticated);
        };
        let mut next = current.clone();

        if let Some(email) = update.email {
            let email = Email::parse(&email)?;
            if email != next.email {
                next.token = UserProfile::display_token(&email);
                next.email = email;
            }
        }
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(gender) = update.gender {
            next.gender = Some(gender);
        }
        if let Some(age) = update.age {
            next.age = Some(age);
        }

        self.persist(&next);
        tracing::info!(email = %next.email, "Profile updated");
        Ok(self.user.insert(next))
    }

    /// Best-effort write: failures are logged and the in-memory state stays.
    fn persist(&self, profile: &UserProfile) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::AUTH, profile) {
            tracing::error!(error = %e, "Failed to persist auth");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_762_310_404_000).unwrap()
    }

    fn login_request(email: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            ..LoginRequest::default()
        }
    }

    #[test]
    fn test_login_persists_and_activates() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::new(storage.clone());

        let profile = auth.login(login_request("Jane@Shop.io"), now()).unwrap();
        assert_eq!(profile.name, "jane");
        assert_eq!(profile.logged_at, now());
        assert!(auth.is_authenticated());

        let stored = AuthStore::load(storage.as_ref()).unwrap().unwrap();
        assert_eq!(stored.email.as_str(), "jane@shop.io");
    }

    #[test]
    fn test_login_invalid_email_keeps_session() {
        let mut auth = AuthStore::new(Arc::new(MemoryStorage::new()));
        auth.login(login_request("a@b.c"), now()).unwrap();
        let err = auth.login(login_request("nope"), now()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
        assert_eq!(auth.user().unwrap().email.as_str(), "a@b.c");
    }

    #[test]
    fn test_hydrate_restores_profile() {
        let storage = Arc::new(MemoryStorage::new());
        AuthStore::new(storage.clone())
            .login(login_request("jane@shop.io"), now())
            .unwrap();

        let auth = AuthStore::hydrate(storage);
        assert_eq!(auth.user().unwrap().email.as_str(), "jane@shop.io");
    }

    #[test]
    fn test_hydrate_corrupt_record_is_logged_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::AUTH, "{\"name\":").unwrap();
        let auth = AuthStore::hydrate(storage);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let storage = Arc::new(MemoryStorage::with_quota(4));
        let mut auth = AuthStore::new(storage.clone());
        auth.login(login_request("jane@shop.io"), now()).unwrap();
        assert!(auth.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_logout_clears_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::new(storage.clone());
        auth.login(login_request("jane@shop.io"), now()).unwrap();
        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(AuthStore::load(storage.as_ref()).unwrap().is_none());
    }

    #[test]
    fn test_signup_password_mismatch() {
        let mut auth = AuthStore::new(Arc::new(MemoryStorage::new()));
        let request = SignupRequest {
            name: "Jane Doe".to_string(),
            email: "jane@shop.io".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter23".to_string(),
            gender: Some(Gender::Female),
            age: Some(30),
        };
        assert_eq!(
            auth.signup(request.clone(), now()).unwrap_err(),
            AuthError::PasswordMismatch
        );
        assert!(!auth.is_authenticated());

        let request = SignupRequest {
            confirm_password: request.password.clone(),
            ..request
        };
        let profile = auth.signup(request, now()).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.gender, Some(Gender::Female));
    }

    #[test]
    fn test_update_user_requires_login() {
        let mut auth = AuthStore::new(Arc::new(MemoryStorage::new()));
        let err = auth.update_user(ProfileUpdate::default()).unwrap_err();
        assert_eq!(err, AuthError::NotAuthenticated);
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_update_user_merges_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = AuthStore::new(storage.clone());
        auth.login(login_request("jane@shop.io"), now()).unwrap();
        let old_token = auth.user().unwrap().token.clone();

        let update = ProfileUpdate {
            age: Some(31),
            email: Some("jane.doe@shop.io".to_string()),
            ..ProfileUpdate::default()
        };
        let profile = auth.update_user(update).unwrap();
        assert_eq!(profile.name, "jane");
        assert_eq!(profile.age, Some(31));
        assert_ne!(profile.token, old_token);

        let stored = AuthStore::load(storage.as_ref()).unwrap().unwrap();
        assert_eq!(stored.email.as_str(), "jane.doe@shop.io");
    }
}
