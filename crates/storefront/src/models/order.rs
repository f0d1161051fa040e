//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use premium_core::{Email, OrderId, PaymentMode, Price};

use super::cart::{CartLine, CartTotals};

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub landmark: String,
    pub pincode: String,
    /// City resolved from the pincode at checkout.
    pub city: String,
}

/// An order snapshot.
///
/// Fields are only reachable through accessors: once built, the items and
/// totals of an order never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    items: Vec<CartLine>,
    subtotal: Price,
    shipping: Price,
    total: Price,
    address: ShippingAddress,
    payment_mode: PaymentMode,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    user: Option<Email>,
}

impl Order {
    /// Build an order placed at `created_at` with a freshly generated ID.
    #[must_use]
    pub fn new(
        items: Vec<CartLine>,
        totals: CartTotals,
        address: ShippingAddress,
        payment_mode: PaymentMode,
        created_at: DateTime<Utc>,
        user: Option<Email>,
    ) -> Self {
        Self {
            id: OrderId::generate(created_at),
            items,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            address,
            payment_mode,
            created_at,
            user,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.subtotal
    }

    #[must_use]
    pub const fn shipping(&self) -> Price {
        self.shipping
    }

    /// Amount charged, shipping included.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    #[must_use]
    pub const fn address(&self) -> &ShippingAddress {
        &self.address
    }

    #[must_use]
    pub const fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Email of the shopper who placed the order, if one was logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&Email> {
        self.user.as_ref()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use premium_core::Product;

    fn sample_order() -> Order {
        let mut line = CartLine::new(Product::new("p1", "Tote", Price::from_units(20), "Fashion"));
        line.increment();
        let totals = CartTotals {
            subtotal: Price::from_units(40),
            shipping: Price::from_units(10),
            total: Price::from_units(50),
        };
        let address = ShippingAddress {
            address1: "12 MG Road".to_string(),
            address2: String::new(),
            landmark: String::new(),
            pincode: "560001".to_string(),
            city: "Bengaluru".to_string(),
        };
        Order::new(
            vec![line],
            totals,
            address,
            PaymentMode::Cod,
            Utc.timestamp_millis_opt(1_762_000_000_000).unwrap(),
            Some(Email::parse("jane@shop.io").unwrap()),
        )
    }

    #[test]
    fn test_persisted_layout() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["paymentMode"], "cod");
        assert_eq!(json["createdAt"], 1_762_000_000_000_i64);
        assert_eq!(json["user"], "jane@shop.io");
        assert_eq!(json["total"], "50");
        assert_eq!(json["address"]["city"], "Bengaluru");
        assert_eq!(json["items"][0]["id"], "p1");
        assert_eq!(json["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_json_roundtrip_keeps_snapshot() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
        assert_eq!(parsed.item_count(), 2);
    }

    #[test]
    fn test_id_encodes_creation_time() {
        let order = sample_order();
        assert_eq!(
            order.id().timestamp_millis(),
            Some(order.created_at().timestamp_millis())
        );
    }
}
