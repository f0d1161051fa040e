//! Application state for one shopping session.
//!
//! `AppState` owns every store. Construction follows a fixed order: storage
//! backends first, then the auth profile and order log are restored from
//! durable storage, then the session-only cart and wishlist start empty.

use std::sync::Arc;

use chrono::Utc;

use premium_core::{Product, ProductId};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::models::UserProfile;
use crate::promotions::{HeroCarousel, NewsletterPrompt};
use crate::services::auth::{AuthError, AuthStore, LoginRequest, ProfileUpdate, SignupRequest};
use crate::services::cart::CartStore;
use crate::services::checkout::{
    CheckoutError, CheckoutFlow, CheckoutForm, CheckoutStep, Destination, PlacedOrder,
};
use crate::services::orders::OrdersStore;
use crate::services::wishlist::WishlistStore;
use crate::storage::{FileStorage, KeyValueStore, MemoryStorage};

/// All storefront state for one session.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    catalog: Catalog,
    auth: AuthStore,
    orders: OrdersStore,
    cart: CartStore,
    wishlist: WishlistStore,
    checkout: CheckoutFlow,
    carousel: HeroCarousel,
    newsletter: NewsletterPrompt,
}

impl AppState {
    /// Open file-backed state as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// configured catalog file cannot be loaded.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let durable: Arc<dyn KeyValueStore> = Arc::new(FileStorage::open(config.data_dir.clone())?);
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::demo(),
        };
        Ok(Self::with_storage(config, durable, catalog))
    }

    /// Demo catalog with everything held in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_storage(
            StorefrontConfig::default(),
            Arc::new(MemoryStorage::new()),
            Catalog::demo(),
        )
    }

    /// Build state over an existing durable store.
    #[must_use]
    pub fn with_storage(
        config: StorefrontConfig,
        durable: Arc<dyn KeyValueStore>,
        catalog: Catalog,
    ) -> Self {
        let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
        let auth = AuthStore::hydrate(durable.clone());
        let orders = OrdersStore::hydrate(durable.clone());

        tracing::info!(
            products = catalog.len(),
            logged_in = auth.is_authenticated(),
            orders = orders.len(),
            "Storefront state ready"
        );

        Self {
            checkout: CheckoutFlow::new(config.shipping),
            newsletter: NewsletterPrompt::new(session.clone()),
            config,
            durable,
            session,
            catalog,
            auth,
            orders,
            cart: CartStore::new(),
            wishlist: WishlistStore::new(),
            carousel: HeroCarousel::new(),
        }
    }

    /// Start a fresh session over the same durable storage.
    ///
    /// Cart, wishlist, checkout progress and session storage are discarded;
    /// the profile and order log are restored again from durable storage.
    pub fn reset(&mut self) {
        self.session = Arc::new(MemoryStorage::new());
        self.newsletter = NewsletterPrompt::new(self.session.clone());
        self.auth = AuthStore::hydrate(self.durable.clone());
        self.orders = OrdersStore::hydrate(self.durable.clone());
        self.cart = CartStore::new();
        self.wishlist = WishlistStore::new();
        self.checkout = CheckoutFlow::new(self.config.shipping);
        self.carousel = HeroCarousel::new();
        tracing::debug!("Session reset");
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }

    #[must_use]
    pub const fn orders(&self) -> &OrdersStore {
        &self.orders
    }

    pub const fn orders_mut(&mut self) -> &mut OrdersStore {
        &mut self.orders
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    #[must_use]
    pub const fn checkout(&self) -> &CheckoutFlow {
        &self.checkout
    }

    #[must_use]
    pub const fn carousel(&self) -> &HeroCarousel {
        &self.carousel
    }

    pub const fn carousel_mut(&mut self) -> &mut HeroCarousel {
        &mut self.carousel
    }

    #[must_use]
    pub const fn newsletter(&self) -> &NewsletterPrompt {
        &self.newsletter
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        Ok(self.catalog.get(id)?)
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID.
    pub fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<()> {
        let product = self.catalog.get(id)?;
        self.cart.add_quantity(product, quantity);
        Ok(())
    }

    /// Toggle a catalog product in the wishlist; returns whether it is now in.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self.catalog.get(id)?;
        Ok(self.wishlist.toggle_wishlist(product))
    }

    /// Log in now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a malformed email.
    pub fn login(&mut self, request: LoginRequest) -> std::result::Result<&UserProfile, AuthError> {
        self.auth.login(request, Utc::now())
    }

    /// Sign up and log in now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for mismatched passwords or a malformed email.
    pub fn signup(
        &mut self,
        request: SignupRequest,
    ) -> std::result::Result<&UserProfile, AuthError> {
        self.auth.signup(request, Utc::now())
    }

    pub fn logout(&mut self) {
        self.auth.logout();
    }

    /// Edit the active profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when nobody is logged in.
    pub fn update_profile(
        &mut self,
        update: ProfileUpdate,
    ) -> std::result::Result<&UserProfile, AuthError> {
        self.auth.update_user(update)
    }

    pub fn begin_checkout(&mut self) -> CheckoutStep {
        self.checkout.begin(&self.cart, &self.auth)
    }

    /// "Buy now" for a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID.
    pub fn buy_now(&mut self, id: &ProductId, quantity: u32) -> Result<CheckoutStep> {
        let product = self.catalog.get(id)?;
        Ok(self
            .checkout
            .buy_now(product, quantity, &mut self.cart, &self.auth))
    }

    /// Continue an interrupted checkout after logging in.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotAuthenticated` when nobody is logged in.
    pub fn resume_after_login(&mut self) -> std::result::Result<Destination, CheckoutError> {
        self.checkout
            .resume_after_login(&self.auth, &mut self.cart, &self.catalog)
    }

    /// Place an order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` when the cart, login or form is not acceptable.
    pub fn place_order(
        &mut self,
        form: &CheckoutForm,
    ) -> std::result::Result<PlacedOrder, CheckoutError> {
        self.checkout
            .submit(form, &self.cart, &self.auth, &mut self.orders, Utc::now())
    }

    /// Confirm a placed order, which empties the cart.
    pub fn acknowledge_order(&mut self, receipt: PlacedOrder) -> Destination {
        self.checkout.acknowledge(receipt, &mut self.cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use premium_core::PaymentMode;

    use super::*;

    fn login(state: &mut AppState) {
        state
            .login(LoginRequest {
                email: "sam@shop.io".to_string(),
                ..LoginRequest::default()
            })
            .unwrap();
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let mut state = AppState::in_memory();
        let err = state.add_to_cart(&"nope".into(), 1).unwrap_err();
        assert_eq!(err.user_message(), "Product nope not found");
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_reset_keeps_durable_state_only() {
        let mut state = AppState::in_memory();
        login(&mut state);
        let first = state.catalog().products()[0].id.clone();
        state.add_to_cart(&first, 2).unwrap();
        state.toggle_wishlist(&first).unwrap();
        state.newsletter().dismiss();

        state.reset();

        assert!(state.auth().is_authenticated());
        assert!(state.cart().is_empty());
        assert!(state.wishlist().is_empty());
        assert!(state.newsletter().should_show());
    }

    #[test]
    fn test_order_round_trip() {
        let mut state = AppState::in_memory();
        login(&mut state);
        let first = state.catalog().products()[0].id.clone();
        state.add_to_cart(&first, 1).unwrap();
        assert_eq!(state.begin_checkout(), CheckoutStep::Ready);

        let receipt = state
            .place_order(&CheckoutForm {
                address1: "7 Marine Drive".to_string(),
                pincode: "400001".to_string(),
                payment_mode: PaymentMode::Cod,
                ..CheckoutForm::default()
            })
            .unwrap();
        assert_eq!(state.orders().len(), 1);
        assert!(!state.cart().is_empty());

        assert_eq!(state.acknowledge_order(receipt), Destination::Orders);
        assert!(state.cart().is_empty());

        state.reset();
        assert_eq!(state.orders().len(), 1);
    }
}
