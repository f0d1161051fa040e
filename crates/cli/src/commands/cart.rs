//! Cart and wishlist commands.

use premium_storefront::AppState;
use premium_storefront::models::CartTotals;

use super::catalog::product_row;
use super::{CartAction, WishlistAction};

/// Subtotal, shipping and total lines.
pub fn totals_lines(totals: &CartTotals) -> Vec<String> {
    let shipping = if totals.free_shipping() {
        "FREE".to_string()
    } else {
        totals.shipping.to_string()
    };
    vec![
        format!("Subtotal: {}", totals.subtotal),
        format!("Shipping: {shipping}"),
        format!("Total:    {}", totals.total),
    ]
}

fn show_cart(state: &AppState) -> String {
    let cart = state.cart();
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }
    let mut lines: Vec<String> = cart
        .lines()
        .iter()
        .map(|line| {
            format!(
                "{:<4} {:<32} {:>3} x {:>9} = {}",
                line.product_id().as_str(),
                line.product().name,
                line.quantity(),
                line.unit_price().to_string(),
                line.line_total()
            )
        })
        .collect();
    lines.push(format!("{} item(s)", cart.cart_items_count()));
    lines.extend(totals_lines(&cart.totals(&state.config().shipping)));
    lines.join("\n")
}

/// Run a cart subcommand.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` when adding an unknown product.
pub fn cart(state: &mut AppState, action: CartAction) -> premium_storefront::Result<String> {
    match action {
        CartAction::Show => {}
        CartAction::Add { id, quantity } => state.add_to_cart(&id.into(), quantity)?,
        CartAction::Set { id, quantity } => state.cart_mut().update_quantity(&id.into(), quantity),
        CartAction::Remove { id } => state.cart_mut().remove_from_cart(&id.into()),
        CartAction::Clear => state.cart_mut().clear_cart(),
    }
    Ok(show_cart(state))
}

/// Run a wishlist subcommand.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` when toggling an unknown product.
pub fn wishlist(
    state: &mut AppState,
    action: WishlistAction,
) -> premium_storefront::Result<String> {
    match action {
        WishlistAction::Toggle { id } => {
            let added = state.toggle_wishlist(&id.clone().into())?;
            Ok(if added {
                format!("Added {id} to wishlist")
            } else {
                format!("Removed {id} from wishlist")
            })
        }
        WishlistAction::Show => {
            let wishlist = state.wishlist();
            if wishlist.is_empty() {
                return Ok("Your wishlist is empty".to_string());
            }
            let mut lines: Vec<String> = wishlist.items().iter().map(product_row).collect();
            lines.push(format!("{} liked product(s)", wishlist.len()));
            Ok(lines.join("\n"))
        }
    }
}
