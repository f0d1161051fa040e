//! Shopper profile domain type.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use premium_core::{Email, Gender};

/// The logged-in shopper.
///
/// Persisted as `{name, email, gender, age, token, loggedAt}`. The token is a
/// display-only marker derived from the email; it authenticates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: Email,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub logged_at: DateTime<Utc>,
}

impl UserProfile {
    /// Derive the opaque display token for an email.
    #[must_use]
    pub fn display_token(email: &Email) -> String {
        STANDARD.encode(format!("{email}:demo-token"))
    }

    /// Up to two uppercase initials for avatar display.
    ///
    /// Falls back to the email when the name is blank, and to `U` when both
    /// yield nothing.
    #[must_use]
    pub fn initials(&self) -> String {
        let source = if self.name.trim().is_empty() {
            self.email.as_str()
        } else {
            self.name.as_str()
        };
        let initials: String = source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}
