//! Cart store.
//!
//! Holds at most one line per product, each with a quantity between one and
//! [`MAX_LINE_QUANTITY`].
//! Totals and counts are recomputed from the lines on every call.

use rust_decimal::Decimal;
use tracing::instrument;

use premium_core::{Price, Product, ProductId};

use crate::models::{CartLine, CartTotals, MAX_LINE_QUANTITY};

/// Flat-fee shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    /// Subtotals at or above this amount ship free.
    pub free_threshold: Price,
    /// Fee charged below the threshold.
    pub flat_fee: Price,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: Price::new(Decimal::ONE_HUNDRED),
            flat_fee: Price::new(Decimal::TEN),
        }
    }
}

impl ShippingPolicy {
    /// Shipping fee for a subtotal: zero for an empty cart, free at or above
    /// the threshold, flat fee otherwise.
    #[must_use]
    pub fn fee_for(&self, subtotal: Price) -> Price {
        if subtotal <= Price::ZERO || subtotal >= self.free_threshold {
            Price::ZERO
        } else {
            self.flat_fee
        }
    }

    /// Subtotal, fee and grand total for a subtotal.
    #[must_use]
    pub fn totals_for(&self, subtotal: Price) -> CartTotals {
        let shipping = self.fee_for(subtotal);
        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// The shopper's cart for the current session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order products were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if it is in the cart.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Add one unit of a product: increments its line or creates one.
    ///
    /// A line already holding [`MAX_LINE_QUANTITY`] units stays as it is.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id() == &product.id) {
            if !line.increment() {
                tracing::debug!("Cart line is full");
                return;
            }
        } else {
            self.lines.push(CartLine::new(product.clone()));
        }
        tracing::debug!(count = self.cart_items_count(), "Added to cart");
    }

    /// Add `quantity` units of a product, one at a time.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) {
        for _ in 0..quantity.min(MAX_LINE_QUANTITY) {
            self.add_to_cart(product);
        }
    }

    /// Set a line's quantity; zero or less removes the line. Quantities
    /// above [`MAX_LINE_QUANTITY`] are capped.
    ///
    /// Does nothing if the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        let Some(index) = self.lines.iter().position(|l| l.product_id() == product_id) else {
            tracing::debug!(%product_id, "Quantity update for product not in cart");
            return;
        };

        if quantity <= 0 {
            self.lines.remove(index);
            return;
        }

        let quantity =
            u32::try_from(quantity).map_or(MAX_LINE_QUANTITY, |q| q.min(MAX_LINE_QUANTITY));
        if let Some(line) = self.lines.get_mut(index) {
            line.set_quantity(quantity);
        }
    }

    /// Remove a product's line. Does nothing if it is absent.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| l.product_id() != product_id);
    }

    /// Take `units` off a product's line, removing it once nothing is left.
    /// Does nothing if the product is absent.
    pub fn remove_units(&mut self, product_id: &ProductId, units: u32) {
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id() == product_id) else {
            return;
        };
        let left = line.quantity().saturating_sub(units);
        if left == 0 {
            self.remove_from_cart(product_id);
        } else {
            line.set_quantity(left);
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Sum of captured unit price times quantity.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities across lines (the cart badge number).
    #[must_use]
    pub fn cart_items_count(&self) -> u32 {
        self.lines
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Subtotal, shipping and total under a shipping policy.
    #[must_use]
    pub fn totals(&self, policy: &ShippingPolicy) -> CartTotals {
        policy.totals_for(self.cart_total())
    }
}
