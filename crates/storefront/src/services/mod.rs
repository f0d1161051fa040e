//! Storefront stores and the checkout flow.
//!
//! - `cart` - Session cart and shipping policy
//! - `wishlist` - Session wishlist
//! - `auth` - Display-only login, persisted profile
//! - `orders` - Persisted order history
//! - `checkout` - Cart to order, gated on login

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod wishlist;
