//! Storage keys for persisted session state.

/// Keys used in durable and session storage.
pub mod keys {
    /// Durable key holding the logged-in shopper profile.
    pub const AUTH: &str = "app_auth";

    /// Durable key holding the order history (most recent first).
    pub const ORDERS: &str = "app_orders";

    /// Session key set once the newsletter prompt has been shown.
    pub const NEWSLETTER_SEEN: &str = "newsletterPopupSeen";
}
