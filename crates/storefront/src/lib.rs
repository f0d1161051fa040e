//! Premium storefront state layer.
//!
//! Catalog queries, cart, wishlist, display-only login, checkout and order
//! history over in-memory state and a key-value store. [`state::AppState`]
//! owns one session's worth of stores.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod promotions;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{AppError, Result};
pub use state::AppState;
