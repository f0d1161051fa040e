//! Catalog browsing commands.

use premium_core::{Product, ProductId};
use premium_storefront::AppState;
use premium_storefront::catalog::RELATED_LIMIT;

/// One product as a listing row.
pub fn product_row(product: &Product) -> String {
    let mut row = format!(
        "{:<4} {:<32} {:>9}  {}",
        product.id.as_str(),
        product.name,
        product.price.to_string(),
        product.category
    );
    if let Some(discount) = product.discount {
        row.push_str(&format!("  -{discount}%"));
    }
    if product.is_flash_deal {
        row.push_str("  [flash deal]");
    }
    row
}

/// Products matching an optional search text and category.
pub fn list(state: &AppState, search: Option<&str>, category: Option<&str>) -> String {
    let products = state.catalog().search(search.unwrap_or_default(), category);
    if products.is_empty() {
        return "No products found".to_string();
    }
    let mut lines: Vec<String> = products.into_iter().map(product_row).collect();
    lines.push(format!("{} product(s)", lines.len()));
    lines.join("\n")
}

pub fn categories(state: &AppState) -> String {
    state.catalog().list_categories().join("\n")
}

/// Product details with related products.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` for an unknown ID.
pub fn product(state: &AppState, id: &ProductId) -> premium_storefront::Result<String> {
    let product = state.product(id)?;
    let mut lines = vec![
        format!("{} ({})", product.name, product.category),
        format!("Price: {}", product.price),
    ];
    if let (Some(original), Some(savings)) = (product.original_price, product.savings()) {
        lines.push(format!("Was {original}, you save {savings}"));
    }
    if let Some(rating) = product.rating {
        let reviews = product.review_count.unwrap_or(0);
        lines.push(format!("Rating: {rating:.1} ({reviews} reviews)"));
    }
    if !product.description.is_empty() {
        lines.push(product.description.clone());
    }
    if state.wishlist().is_in_wishlist(&product.id) {
        lines.push("In your wishlist".to_string());
    }
    if let Some(line) = state.cart().line(&product.id) {
        lines.push(format!("In your cart: {}", line.quantity()));
    }

    let related = state.catalog().related(product, RELATED_LIMIT);
    if !related.is_empty() {
        lines.push(String::new());
        lines.push("You may also like:".to_string());
        lines.extend(related.into_iter().map(product_row));
    }
    Ok(lines.join("\n"))
}
