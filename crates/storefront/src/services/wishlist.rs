//! Wishlist store.

use premium_core::{Product, ProductId};

/// Products the shopper has liked, in the order they were liked.
///
/// A product appears at most once.
#[derive(Debug, Clone, Default)]
pub struct WishlistStore {
    items: Vec<Product>,
}

impl WishlistStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of liked products (the wishlist badge number).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a product unless it is already present.
    pub fn add_to_wishlist(&mut self, product: &Product) {
        if !self.is_in_wishlist(&product.id) {
            self.items.push(product.clone());
        }
    }

    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) {
        self.items.retain(|p| &p.id != product_id);
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Remove the product if present, add it otherwise.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle_wishlist(&mut self, product: &Product) -> bool {
        if self.is_in_wishlist(&product.id) {
            self.remove_from_wishlist(&product.id);
            tracing::debug!(product_id = %product.id, "Removed from wishlist");
            false
        } else {
            self.items.push(product.clone());
            tracing::debug!(product_id = %product.id, "Added to wishlist");
            true
        }
    }
}
