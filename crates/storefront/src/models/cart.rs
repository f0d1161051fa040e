//! Cart line items and derived totals.

use serde::{Deserialize, Serialize};

use premium_core::{Price, Product, ProductId};

/// Most units a single cart line holds; larger requests are capped.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// A product in the cart together with how many units were added.
///
/// The product is a snapshot taken when it first entered the cart, so the
/// captured unit price is what the line is charged at. Quantity is at least
/// one and at most [`MAX_LINE_QUANTITY`]; the cart removes a line instead of
/// storing zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub(crate) const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured when the line was created.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.product.price
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    /// Returns false when the line is already full.
    pub(crate) const fn increment(&mut self) -> bool {
        if self.quantity >= MAX_LINE_QUANTITY {
            return false;
        }
        self.quantity += 1;
        true
    }

    /// Callers must remove the line rather than pass zero.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity > 0, "cart lines never hold zero units");
        self.quantity = quantity.min(MAX_LINE_QUANTITY);
    }
}

/// Subtotal, shipping fee and grand total for a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CartTotals {
    /// Whether shipping is free for these totals.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
