//! Order history store.

use std::sync::Arc;

use premium_core::OrderId;

use crate::models::Order;
use crate::models::session::keys;
use crate::storage::{self, KeyValueStore, StorageError};

/// Append-only order log, most recent first, mirrored to durable storage.
#[derive(Debug)]
pub struct OrdersStore {
    storage: Arc<dyn KeyValueStore>,
    orders: Vec<Order>,
}

impl OrdersStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            orders: Vec::new(),
        }
    }

    /// Read the persisted order log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be read or decoded.
    pub fn load(storage: &dyn KeyValueStore) -> Result<Vec<Order>, StorageError> {
        Ok(storage::load_json(storage, keys::ORDERS)?.unwrap_or_default())
    }

    /// Create a store and restore the persisted log.
    ///
    /// An unreadable or corrupt record is logged and treated as empty.
    #[must_use]
    pub fn hydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let orders = Self::load(storage.as_ref()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable orders record");
            Vec::new()
        });
        tracing::debug!(count = orders.len(), "Restored order history");
        Self { storage, orders }
    }

    /// Orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    /// Put an order at the front of the log and persist the log.
    pub fn add_order(&mut self, order: Order) {
        tracing::info!(order_id = %order.id(), total = %order.total(), "Order recorded");
        self.orders.insert(0, order);
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::ORDERS, &self.orders) {
            tracing::error!(error = %e, "Failed to persist orders");
        }
    }

    /// Drop every order and the persisted log.
    pub fn clear_orders(&mut self) {
        self.orders.clear();
        if let Err(e) = self.storage.remove(keys::ORDERS) {
            tracing::error!(error = %e, "Failed to clear orders");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{CartTotals, ShippingAddress};
    use crate::storage::MemoryStorage;
    use chrono::{TimeZone, Utc};
    use premium_core::{PaymentMode, Price};

    fn order(millis: i64) -> Order {
        let totals = CartTotals {
            subtotal: Price::from_units(50),
            shipping: Price::from_units(10),
            total: Price::from_units(60),
        };
        let address = ShippingAddress {
            address1: "1 Park Street".to_string(),
            address2: String::new(),
            landmark: String::new(),
            pincode: "700001".to_string(),
            city: "Kolkata".to_string(),
        };
        Order::new(
            Vec::new(),
            totals,
            address,
            PaymentMode::Upi,
            Utc.timestamp_millis_opt(millis).unwrap(),
            None,
        )
    }

    #[test]
    fn test_most_recent_first() {
        let mut store = OrdersStore::new(Arc::new(MemoryStorage::new()));
        let o1 = order(1_000);
        let o2 = order(2_000);
        store.add_order(o1.clone());
        store.add_order(o2.clone());
        assert_eq!(store.orders(), &[o2, o1]);
    }

    #[test]
    fn test_hydrate_restores_log() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = OrdersStore::new(storage.clone());
        let o1 = order(1_000);
        store.add_order(o1.clone());

        let restored = OrdersStore::hydrate(storage);
        assert_eq!(restored.len(), 1);
        assert!(restored.find(o1.id()).is_some());
    }

    #[test]
    fn test_hydrate_corrupt_record_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::ORDERS, "[{\"id\":42}]").unwrap();
        assert!(OrdersStore::hydrate(storage).is_empty());
    }

    #[test]
    fn test_clear_orders_removes_record() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = OrdersStore::new(storage.clone());
        store.add_order(order(1_000));
        store.clear_orders();
        assert!(store.is_empty());
        assert!(storage.get(keys::ORDERS).unwrap().is_none());
    }
}
