//! Premium Core - Shared domain types.
//!
//! This crate provides the value types used across all Premium storefront components:
//! - `storefront` - Catalog, cart, wishlist, auth, orders and checkout state
//! - `cli` - Interactive shopping shell driving a single session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, products and payment choices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
