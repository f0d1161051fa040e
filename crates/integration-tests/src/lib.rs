//! Integration tests for the Premium storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p premium-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart, login and checkout across stores
//! - `persistence` - Durable records surviving a restart

use std::path::Path;
use std::sync::Arc;

use premium_storefront::catalog::Catalog;
use premium_storefront::config::StorefrontConfig;
use premium_storefront::services::auth::LoginRequest;
use premium_storefront::storage::FileStorage;
use premium_storefront::AppState;
use tempfile::TempDir;

/// A storefront over file storage in a throwaway directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Fresh state with the demo catalog and an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = open_state(dir.path());
        Self { dir, state }
    }

    /// Simulate a restart: drop all in-memory state and reopen the same
    /// data directory.
    pub fn restart(&mut self) {
        self.state = open_state(self.dir.path());
    }

    /// Log in a shopper.
    ///
    /// # Panics
    ///
    /// Panics if the email is rejected.
    pub fn login(&mut self, email: &str) {
        self.state
            .login(LoginRequest {
                email: email.to_string(),
                ..LoginRequest::default()
            })
            .expect("Failed to log in");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Open file-backed state in `dir` with the demo catalog.
///
/// # Panics
///
/// Panics if the directory cannot be used as storage.
#[must_use]
pub fn open_state(dir: &Path) -> AppState {
    let storage = FileStorage::open(dir).expect("Failed to open file storage");
    let config = StorefrontConfig {
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    };
    AppState::with_storage(config, Arc::new(storage), Catalog::demo())
}
