//! Read-only product catalog.
//!
//! The catalog is either the built-in demo assortment ([`Catalog::demo`]) or
//! a JSON array of products loaded from disk ([`Catalog::from_json_file`]).
//! Stores never mutate it; they copy products into cart lines and orders.

mod seed;

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use premium_core::{Product, ProductId};

/// Category name meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Default number of related products shown next to a product.
pub const RELATED_LIMIT: usize = 4;

/// Errors raised by catalog lookups and loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the requested ID.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a valid product list.
    #[error("invalid catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two products share an ID.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// An immutable list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product IDs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(&p.id)) {
            return Err(CatalogError::DuplicateId(dup.id.clone()));
        }
        Ok(Self { products })
    }

    /// The built-in demo assortment.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: seed::demo_products(),
        }
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, does not parse,
    /// or contains duplicate IDs.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: shown.clone(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: shown.clone(),
                source,
            })?;
        tracing::info!(path = %shown, count = products.len(), "Loaded catalog");
        Self::new(products)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a product by ID, treating a miss as an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.find_by_id(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Products matching a predicate, in catalog order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&Product>
    where
        P: Fn(&Product) -> bool,
    {
        self.products.iter().filter(|&p| predicate(p)).collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Case-insensitive search over name and description, optionally narrowed
    /// to a category. `None` or [`ALL_CATEGORIES`] means any category.
    #[must_use]
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        let category = category.filter(|c| *c != ALL_CATEGORIES);
        self.filter(|p| {
            category.is_none_or(|c| p.category == c) && p.matches_query(&query)
        })
    }

    /// Products flagged as flash deals.
    #[must_use]
    pub fn flash_deals(&self) -> Vec<&Product> {
        self.filter(|p| p.is_flash_deal)
    }

    /// Products flagged as trending.
    #[must_use]
    pub fn trending(&self) -> Vec<&Product> {
        self.filter(|p| p.is_trending)
    }

    /// Up to `limit` other products from the same category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use premium_core::Price;

    fn small_catalog() -> Catalog {
        let mut shoes = Product::new("s1", "Trail Shoes", Price::from_units(80), "Sports");
        shoes.description = "Grippy outsole".to_string();
        shoes.is_trending = true;
        let mut ball = Product::new("s2", "Football", Price::from_units(25), "Sports");
        ball.is_flash_deal = true;
        let lamp = Product::new("h1", "Desk Lamp", Price::from_units(35), "Home");
        Catalog::new(vec![shoes, ball, lamp]).unwrap()
    }

    #[test]
    fn test_find_by_id() {
        let catalog = small_catalog();
        assert_eq!(catalog.find_by_id(&"h1".into()).unwrap().name, "Desk Lamp");
        assert!(catalog.find_by_id(&"nope".into()).is_none());
        assert!(matches!(
            catalog.get(&"nope".into()),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let a = Product::new("x", "A", Price::from_units(1), "C");
        let b = Product::new("x", "B", Price::from_units(2), "C");
        assert!(matches!(
            Catalog::new(vec![a, b]),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(small_catalog().list_categories(), vec!["Sports", "Home"]);
    }

    #[test]
    fn test_search_name_description_and_category() {
        let catalog = small_catalog();
        let ids = |v: Vec<&Product>| v.iter().map(|p| p.id.to_string()).collect::<Vec<_>>();

        assert_eq!(ids(catalog.search("SHOES", None)), vec!["s1"]);
        assert_eq!(ids(catalog.search("outsole", Some(ALL_CATEGORIES))), vec!["s1"]);
        assert_eq!(ids(catalog.search("", Some("Home"))), vec!["h1"]);
        assert!(catalog.search("lamp", Some("Sports")).is_empty());
        assert_eq!(catalog.search("", None).len(), 3);
    }

    #[test]
    fn test_flags_and_related() {
        let catalog = small_catalog();
        assert_eq!(catalog.flash_deals()[0].id.as_str(), "s2");
        assert_eq!(catalog.trending()[0].id.as_str(), "s1");

        let shoes = catalog.find_by_id(&"s1".into()).unwrap();
        let related = catalog.related(shoes, RELATED_LIMIT);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id.as_str(), "s2");
    }

    #[test]
    fn test_demo_catalog_is_consistent() {
        let demo = Catalog::demo();
        assert!(!demo.is_empty());
        assert!(Catalog::new(demo.products().to_vec()).is_ok());
        assert!(!demo.flash_deals().is_empty());
        assert!(!demo.trending().is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let products = small_catalog().products().to_vec();
        std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

        let loaded = Catalog::from_json_file(&path).unwrap();
        assert_eq!(loaded.len(), 3);

        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Catalog::from_json_file(&path),
            Err(CatalogError::Parse { .. })
        ));
    }
}
