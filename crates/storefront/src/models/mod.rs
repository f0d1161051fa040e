//! Domain models for the storefront.
//!
//! These are the records the stores hold and persist: cart lines, shopper
//! profiles and placed orders. Behaviour lives in [`crate::services`].

pub mod cart;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{CartLine, CartTotals, MAX_LINE_QUANTITY};
pub use order::{Order, ShippingAddress};
pub use user::UserProfile;
