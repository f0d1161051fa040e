//! Product records served by the catalog.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// Products are immutable once loaded. Cart lines and orders keep their own
/// copy, so the price a shopper saw is the price they pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    /// Image reference (URL or asset path).
    pub image: String,
    pub description: String,
    /// Price before the discount, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Discount percentage (e.g. 25 for 25% off).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub is_flash_deal: bool,
    #[serde(default)]
    pub is_trending: bool,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            original_price: None,
            discount: None,
            rating: None,
            review_count: None,
            is_flash_deal: false,
            is_trending: false,
        }
    }

    /// Amount saved against the original price, if the product is discounted.
    #[must_use]
    pub fn savings(&self) -> Option<Price> {
        let original = self.original_price?;
        (original > self.price).then(|| Price::new(original.amount() - self.price.amount()))
    }

    /// Whether `query` (already lowercased) appears in the name or description.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
    }
}
