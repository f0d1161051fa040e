//! Checkout flow.
//!
//! Turns the cart into an order for the logged-in shopper:
//!
//! ```text
//! Idle --begin--> RedirectedToLogin --resume_after_login--> Ready
//!   |                                                         |
//!   +------------------------begin (logged in)----------------+
//!                                                             |
//!             Idle <--acknowledge-- AwaitingAcknowledgment <--submit
//! ```
//!
//! Submitting appends the order to the order log but leaves the cart alone.
//! The ordered units leave the cart only when the shopper acknowledges the
//! placed order, which consumes the [`PlacedOrder`] receipt returned by
//! submit. Anything added to the cart in between stays there.

mod city;
mod error;
mod form;

pub use city::{UNKNOWN_CITY, city_for_pincode};
pub use error::CheckoutError;
pub use form::{CheckoutForm, Field, PaymentDetails, ValidatedCheckout};

use chrono::{DateTime, Utc};
use tracing::instrument;

use premium_core::{OrderId, Price, Product, ProductId};

use super::auth::AuthStore;
use super::cart::{CartStore, ShippingPolicy};
use super::orders::OrdersStore;
use crate::catalog::Catalog;
use crate::models::Order;

/// Screens the flow can send the shopper to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Home,
    Cart,
    Checkout,
    Login,
    Orders,
    Profile,
}

/// A "buy now" request waiting for the shopper to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNowItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Where to go once the shopper has logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub from: Destination,
    /// Product to put in the cart after login, set by "buy now".
    pub buy_now: Option<BuyNowItem>,
}

impl LoginRedirect {
    #[must_use]
    pub const fn checkout() -> Self {
        Self {
            from: Destination::Checkout,
            buy_now: None,
        }
    }
}

/// Outcome of trying to enter checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Show the checkout form.
    Ready,
    /// Nothing to check out; back to the cart.
    RedirectToCart,
    /// Log in first, then resume.
    RedirectToLogin(LoginRedirect),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    RedirectedToLogin(LoginRedirect),
    Ready,
    AwaitingAcknowledgment(OrderId),
}

/// Proof that an order was placed. Acknowledging it takes the ordered units
/// out of the cart.
#[derive(Debug)]
#[must_use = "the cart is only cleared once the order is acknowledged"]
pub struct PlacedOrder {
    order_id: OrderId,
    total: Price,
    ordered: Vec<(ProductId, u32)>,
}

impl PlacedOrder {
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }
}

/// Drives one shopper through checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    policy: ShippingPolicy,
    state: CheckoutState,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new(policy: ShippingPolicy) -> Self {
        Self {
            policy,
            state: CheckoutState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    #[must_use]
    pub const fn policy(&self) -> &ShippingPolicy {
        &self.policy
    }

    /// Login redirect waiting for the shopper to log in, if any.
    #[must_use]
    pub const fn pending_redirect(&self) -> Option<&LoginRedirect> {
        match &self.state {
            CheckoutState::RedirectedToLogin(redirect) => Some(redirect),
            _ => None,
        }
    }

    /// Enter checkout with the current cart.
    pub fn begin(&mut self, cart: &CartStore, auth: &AuthStore) -> CheckoutStep {
        if let CheckoutState::AwaitingAcknowledgment(_) = self.state {
            return CheckoutStep::Ready;
        }
        if cart.is_empty() {
            self.state = CheckoutState::Idle;
            return CheckoutStep::RedirectToCart;
        }
        if !auth.is_authenticated() {
            return self.redirect_to_login(LoginRedirect::checkout());
        }
        self.state = CheckoutState::Ready;
        CheckoutStep::Ready
    }

    /// "Buy now" from a product page.
    ///
    /// A logged-in shopper gets `quantity` units added and goes straight to
    /// checkout. Anyone else is sent to log in with the product and quantity
    /// remembered; the cart is not touched until they do.
    #[instrument(skip(self, product, cart, auth), fields(product_id = %product.id))]
    pub fn buy_now(
        &mut self,
        product: &Product,
        quantity: u32,
        cart: &mut CartStore,
        auth: &AuthStore,
    ) -> CheckoutStep {
        if !auth.is_authenticated() {
            return self.redirect_to_login(LoginRedirect {
                from: Destination::Checkout,
                buy_now: Some(BuyNowItem {
                    product_id: product.id.clone(),
                    quantity: quantity.max(1),
                }),
            });
        }
        cart.add_quantity(product, quantity.max(1));
        self.begin(cart, auth)
    }

    /// Pick up where the shopper left off after logging in.
    ///
    /// Existing cart lines are kept. A remembered buy-now product is added
    /// in the quantity the shopper picked, if the catalog still has it. Returns where to go next, or
    /// [`Destination::Home`] when no redirect was pending.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotAuthenticated` if nobody is logged in; the
    /// pending redirect is kept.
    pub fn resume_after_login(
        &mut self,
        auth: &AuthStore,
        cart: &mut CartStore,
        catalog: &Catalog,
    ) -> Result<Destination, CheckoutError> {
        if !auth.is_authenticated() {
            return Err(CheckoutError::NotAuthenticated);
        }
        let CheckoutState::RedirectedToLogin(redirect) = std::mem::take(&mut self.state) else {
            return Ok(Destination::Home);
        };

        if let Some(item) = &redirect.buy_now {
            match catalog.find_by_id(&item.product_id) {
                Some(product) => cart.add_quantity(product, item.quantity),
                None => tracing::warn!(
                    product_id = %item.product_id,
                    "Buy-now product no longer in catalog"
                ),
            }
        }

        if redirect.from == Destination::Checkout && !cart.is_empty() {
            self.state = CheckoutState::Ready;
        }
        tracing::debug!(destination = ?redirect.from, "Resumed after login");
        Ok(redirect.from)
    }

    /// Validate the form and place the order.
    ///
    /// The order snapshots the cart lines, is recorded in `orders` and
    /// belongs to the logged-in shopper. The cart is left as it is until
    /// [`Self::acknowledge`].
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` for an empty cart, a missing login, an order
    /// still awaiting acknowledgment, or the first invalid form field.
    /// Nothing is recorded on error.
    #[instrument(skip_all, fields(payment_mode = %form.payment_mode))]
    pub fn submit(
        &mut self,
        form: &CheckoutForm,
        cart: &CartStore,
        auth: &AuthStore,
        orders: &mut OrdersStore,
        now: DateTime<Utc>,
    ) -> Result<PlacedOrder, CheckoutError> {
        if let CheckoutState::AwaitingAcknowledgment(id) = &self.state {
            return Err(CheckoutError::AwaitingAcknowledgment(id.clone()));
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let Some(user) = auth.user() else {
            return Err(CheckoutError::NotAuthenticated);
        };

        let validated = form.validate().inspect_err(|e| {
            tracing::debug!(error = %e, "Checkout form rejected");
        })?;

        let order = Order::new(
            cart.lines().to_vec(),
            cart.totals(&self.policy),
            validated.address,
            validated.payment.mode(),
            now,
            Some(user.email.clone()),
        );
        let receipt = PlacedOrder {
            order_id: order.id().clone(),
            total: order.total(),
            ordered: order
                .items()
                .iter()
                .map(|line| (line.product_id().clone(), line.quantity()))
                .collect(),
        };
        orders.add_order(order);

        tracing::info!(order_id = %receipt.order_id, total = %receipt.total, "Order placed");
        self.state = CheckoutState::AwaitingAcknowledgment(receipt.order_id.clone());
        Ok(receipt)
    }

    /// Confirm a placed order: take the ordered units out of the cart and
    /// head to the order list. With no changes since submit the cart ends up
    /// empty.
    pub fn acknowledge(&mut self, receipt: PlacedOrder, cart: &mut CartStore) -> Destination {
        for (product_id, units) in &receipt.ordered {
            cart.remove_units(product_id, *units);
        }
        self.state = CheckoutState::Idle;
        tracing::debug!(order_id = %receipt.order_id, "Order acknowledged");
        Destination::Orders
    }

    /// Forget any pending redirect or receipt state.
    pub fn reset(&mut self) {
        self.state = CheckoutState::Idle;
    }

    fn redirect_to_login(&mut self, redirect: LoginRedirect) -> CheckoutStep {
        tracing::debug!(buy_now = ?redirect.buy_now, "Checkout needs login");
        self.state = CheckoutState::RedirectedToLogin(redirect.clone());
        CheckoutStep::RedirectToLogin(redirect)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use premium_core::PaymentMode;

    use super::*;
    use crate::services::auth::LoginRequest;
    use crate::storage::MemoryStorage;

    struct Fixture {
        catalog: Catalog,
        cart: CartStore,
        auth: AuthStore,
        orders: OrdersStore,
        flow: CheckoutFlow,
    }

    impl Fixture {
        fn new() -> Self {
            let storage = Arc::new(MemoryStorage::new());
            Self {
                catalog: Catalog::new(vec![
                    Product::new("a", "Alpha", Price::from_units(20), "Test"),
                    Product::new("b", "Beta", Price::from_units(90), "Test"),
                    Product::new("c", "Gamma", Price::from_units(15), "Test"),
                ])
                .unwrap(),
                cart: CartStore::new(),
                auth: AuthStore::new(storage.clone()),
                orders: OrdersStore::new(storage),
                flow: CheckoutFlow::default(),
            }
        }

        fn product(&self, id: &str) -> Product {
            self.catalog.find_by_id(&id.into()).unwrap().clone()
        }

        fn login(&mut self) {
            self.auth
                .login(
                    LoginRequest {
                        email: "jane@shop.io".to_string(),
                        ..LoginRequest::default()
                    },
                    now(),
                )
                .unwrap();
        }

        fn submit(&mut self, form: &CheckoutForm) -> Result<PlacedOrder, CheckoutError> {
            self.flow
                .submit(form, &self.cart, &self.auth, &mut self.orders, now())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_762_000_000_000).unwrap()
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            address1: "12 MG Road".to_string(),
            pincode: "560001".to_string(),
            payment_mode: PaymentMode::Cod,
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_begin_with_empty_cart_goes_to_cart() {
        let mut fx = Fixture::new();
        fx.login();
        assert_eq!(fx.flow.begin(&fx.cart, &fx.auth), CheckoutStep::RedirectToCart);
    }

    #[test]
    fn test_begin_logged_out_redirects_to_login() {
        let mut fx = Fixture::new();
        let a = fx.product("a");
        fx.cart.add_to_cart(&a);
        assert_eq!(
            fx.flow.begin(&fx.cart, &fx.auth),
            CheckoutStep::RedirectToLogin(LoginRedirect::checkout())
        );
        assert!(fx.flow.pending_redirect().is_some());
    }

    #[test]
    fn test_login_resumes_with_same_cart() {
        let mut fx = Fixture::new();
        let a = fx.product("a");
        let b = fx.product("b");
        fx.cart.add_quantity(&a, 2);
        fx.cart.add_to_cart(&b);
        let before = fx.cart.lines().to_vec();

        fx.flow.begin(&fx.cart, &fx.auth);
        fx.login();
        let dest = fx
            .flow
            .resume_after_login(&fx.auth, &mut fx.cart, &fx.catalog)
            .unwrap();

        assert_eq!(dest, Destination::Checkout);
        assert_eq!(fx.cart.lines(), before.as_slice());
        assert_eq!(fx.flow.state(), &CheckoutState::Ready);
    }

    #[test]
    fn test_resume_requires_login() {
        let mut fx = Fixture::new();
        let a = fx.product("a");
        fx.cart.add_to_cart(&a);
        fx.flow.begin(&fx.cart, &fx.auth);
        assert_eq!(
            fx.flow.resume_after_login(&fx.auth, &mut fx.cart, &fx.catalog),
            Err(CheckoutError::NotAuthenticated)
        );
        assert!(fx.flow.pending_redirect().is_some());
    }

    #[test]
    fn test_resume_without_redirect_goes_home() {
        let mut fx = Fixture::new();
        fx.login();
        let dest = fx
            .flow
            .resume_after_login(&fx.auth, &mut fx.cart, &fx.catalog)
            .unwrap();
        assert_eq!(dest, Destination::Home);
    }

    #[test]
    fn test_buy_now_logged_out_keeps_cart_and_adds_after_login() {
        let mut fx = Fixture::new();
        let a = fx.product("a");
        let c = fx.product("c");
        fx.cart.add_to_cart(&a);

        let step = fx.flow.buy_now(&c, 3, &mut fx.cart, &fx.auth);
        assert_eq!(
            step,
            CheckoutStep::RedirectToLogin(LoginRedirect {
                from: Destination::Checkout,
                buy_now: Some(BuyNowItem {
                    product_id: c.id.clone(),
                    quantity: 3,
                }),
            })
        );
        assert!(fx.cart.line(&c.id).is_none());

        fx.login();
        fx.flow
            .resume_after_login(&fx.auth, &mut fx.cart, &fx.catalog)
            .unwrap();
        assert_eq!(fx.cart.line(&a.id).unwrap().quantity(), 1);
        assert_eq!(fx.cart.line(&c.id).unwrap().quantity(), 3);
    }

    #[test]
    fn test_buy_now_logged_in_adds_quantity() {
        let mut fx = Fixture::new();
        fx.login();
        let c = fx.product("c");
        assert_eq!(fx.flow.buy_now(&c, 3, &mut fx.cart, &fx.auth), CheckoutStep::Ready);
        assert_eq!(fx.cart.cart_items_count(), 3);
    }

    #[test]
    fn test_missing_address_places_nothing() {
        let mut fx = Fixture::new();
        fx.login();
        let a = fx.product("a");
        fx.cart.add_to_cart(&a);
        let before = fx.cart.lines().to_vec();

        let bad = CheckoutForm {
            address1: String::new(),
            ..form()
        };
        assert_eq!(
            fx.submit(&bad).unwrap_err(),
            CheckoutError::MissingField(Field::Address1)
        );
        assert!(fx.orders.is_empty());
        assert_eq!(fx.cart.lines(), before.as_slice());
    }

    #[test]
    fn test_submit_requires_cart_and_login() {
        let mut fx = Fixture::new();
        assert_eq!(fx.submit(&form()).unwrap_err(), CheckoutError::EmptyCart);

        let a = fx.product("a");
        fx.cart.add_to_cart(&a);
        assert_eq!(fx.submit(&form()).unwrap_err(), CheckoutError::NotAuthenticated);
        assert!(fx.orders.is_empty());
    }

    #[test]
    fn test_submit_applies_shipping_and_keeps_cart_until_acknowledged() {
        let mut fx = Fixture::new();
        fx.login();
        let a = fx.product("a");
        fx.cart.add_quantity(&a, 2);

        let receipt = fx.submit(&form()).unwrap();
        assert_eq!(receipt.total(), Price::from_units(50));
        assert_eq!(fx.cart.cart_items_count(), 2);

        let order = fx.orders.find(receipt.order_id()).unwrap();
        assert_eq!(order.subtotal(), Price::from_units(40));
        assert_eq!(order.shipping(), Price::from_units(10));
        assert_eq!(order.user().map(premium_core::Email::as_str), Some("jane@shop.io"));
        assert_eq!(order.address().city, "Bengaluru");

        assert!(matches!(
            fx.submit(&form()),
            Err(CheckoutError::AwaitingAcknowledgment(_))
        ));

        let dest = fx.flow.acknowledge(receipt, &mut fx.cart);
        assert_eq!(dest, Destination::Orders);
        assert!(fx.cart.is_empty());
        assert_eq!(fx.orders.len(), 1);
        assert_eq!(fx.flow.state(), &CheckoutState::Idle);
    }

    #[test]
    fn test_free_shipping_order() {
        let mut fx = Fixture::new();
        fx.login();
        let a = fx.product("a");
        let b = fx.product("b");
        fx.cart.add_quantity(&a, 2);
        fx.cart.add_to_cart(&b);

        let receipt = fx.submit(&form()).unwrap();
        let order = fx.orders.find(receipt.order_id()).unwrap();
        assert_eq!(order.subtotal(), Price::from_units(130));
        assert_eq!(order.shipping(), Price::ZERO);
        assert_eq!(order.total(), Price::from_units(130));
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_acknowledge_keeps_units_added_after_submit() {
        let mut fx = Fixture::new();
        fx.login();
        let a = fx.product("a");
        let c = fx.product("c");
        fx.cart.add_to_cart(&a);

        let receipt = fx.submit(&form()).unwrap();
        fx.cart.add_quantity(&c, 2);
        fx.cart.update_quantity(&a.id, 5);

        fx.flow.acknowledge(receipt, &mut fx.cart);
        assert_eq!(fx.cart.line(&a.id).unwrap().quantity(), 4);
        assert_eq!(fx.cart.line(&c.id).unwrap().quantity(), 2);
        assert_eq!(fx.cart.cart_items_count(), 6);
    }
}
