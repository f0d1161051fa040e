//! Checkout and order history commands.

use premium_core::ProductId;
use premium_storefront::AppState;
use premium_storefront::models::Order;
use premium_storefront::services::checkout::{CheckoutForm, CheckoutStep};

use super::cart::totals_lines;
use super::{CheckoutAction, OrdersAction, PlaceArgs, Session};

fn step_message(state: &AppState, step: &CheckoutStep) -> String {
    match step {
        CheckoutStep::RedirectToCart => "Your cart is empty. Add something first.".to_string(),
        CheckoutStep::RedirectToLogin(redirect) => {
            let mut message = "Please log in to continue to checkout.".to_string();
            if let Some(item) = &redirect.buy_now {
                message.push_str(&format!(
                    " {} x product {} will be added once you log in.",
                    item.quantity, item.product_id
                ));
            }
            message
        }
        CheckoutStep::Ready => {
            let cart = state.cart();
            let mut lines = vec![format!("Checkout: {} item(s)", cart.cart_items_count())];
            lines.extend(totals_lines(&cart.totals(&state.config().shipping)));
            lines.push(
                "Run `checkout place --address1 ... --pincode ... --payment ...` to order."
                    .to_string(),
            );
            lines.join("\n")
        }
    }
}

impl From<PlaceArgs> for CheckoutForm {
    fn from(args: PlaceArgs) -> Self {
        Self {
            address1: args.address1,
            address2: args.address2,
            landmark: args.landmark,
            pincode: args.pincode,
            payment_mode: args.payment,
            card_number: args.card_number,
            expiry_date: args.expiry,
            cvv: args.cvv,
            upi_id: args.upi_id,
            bank: args.bank,
        }
    }
}

/// Run a checkout subcommand.
///
/// # Errors
///
/// Returns `CheckoutError` when placing the order is refused.
pub fn checkout(
    session: &mut Session,
    action: CheckoutAction,
) -> premium_storefront::Result<String> {
    match action {
        CheckoutAction::Review => {
            let step = session.state.begin_checkout();
            Ok(step_message(&session.state, &step))
        }
        CheckoutAction::Place(args) => {
            let receipt = session.state.place_order(&CheckoutForm::from(args))?;
            let message = format!(
                "Order {} placed, total {}.\nRun `confirm` to finish.",
                receipt.order_id(),
                receipt.total()
            );
            session.receipt = Some(receipt);
            Ok(message)
        }
    }
}

/// # Errors
///
/// Returns `CatalogError::NotFound` for an unknown product.
pub fn buy_now(
    state: &mut AppState,
    id: &ProductId,
    quantity: u32,
) -> premium_storefront::Result<String> {
    let step = state.buy_now(id, quantity)?;
    Ok(step_message(state, &step))
}

pub fn confirm(session: &mut Session) -> String {
    match session.receipt.take() {
        Some(receipt) => {
            let id = receipt.order_id().clone();
            session.state.acknowledge_order(receipt);
            let left = session.state.cart().cart_items_count();
            if left == 0 {
                format!("Thank you! Order {id} confirmed. Your cart is now empty.")
            } else {
                format!("Thank you! Order {id} confirmed. {left} item(s) are still in your cart.")
            }
        }
        None => "No order is waiting for confirmation".to_string(),
    }
}

fn order_summary(order: &Order) -> String {
    let address = order.address();
    format!(
        "{}  {}  {} item(s)  {}  {}  {}, {}",
        order.id(),
        order.created_at().format("%Y-%m-%d %H:%M"),
        order.item_count(),
        order.total(),
        order.payment_mode().label(),
        address.address1,
        address.city
    )
}

pub fn orders(state: &mut AppState, action: OrdersAction) -> String {
    match action {
        OrdersAction::List => {
            let orders = state.orders();
            if orders.is_empty() {
                return "No orders yet".to_string();
            }
            orders.orders().iter().map(order_summary).collect::<Vec<_>>().join("\n")
        }
        OrdersAction::Clear => {
            state.orders_mut().clear_orders();
            "Order history cleared".to_string()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use premium_core::PaymentMode;
    use premium_storefront::services::auth::LoginRequest;

    use super::*;

    fn place_args(address1: &str) -> PlaceArgs {
        PlaceArgs {
            address1: address1.to_string(),
            address2: String::new(),
            landmark: String::new(),
            pincode: "700001".to_string(),
            payment: PaymentMode::Cod,
            card_number: String::new(),
            expiry: String::new(),
            cvv: String::new(),
            upi_id: String::new(),
            bank: None,
        }
    }

    fn logged_in_session() -> Session {
        let mut state = AppState::in_memory();
        state
            .login(LoginRequest {
                email: "rita@shop.io".to_string(),
                ..LoginRequest::default()
            })
            .unwrap();
        Session::new(state)
    }

    #[test]
    fn test_review_empty_cart() {
        let mut session = logged_in_session();
        let out = checkout(&mut session, CheckoutAction::Review).unwrap();
        assert!(out.starts_with("Your cart is empty"));
    }

    #[test]
    fn test_place_then_confirm() {
        let mut session = logged_in_session();
        let id = session.state.catalog().products()[0].id.clone();
        session.state.add_to_cart(&id, 1).unwrap();

        let out = checkout(&mut session, CheckoutAction::Place(place_args("1 Park Street"))).unwrap();
        assert!(out.contains("placed"));
        assert!(session.receipt.is_some());
        assert!(!session.state.cart().is_empty());

        let out = confirm(&mut session);
        assert!(out.contains("confirmed"));
        assert!(session.state.cart().is_empty());
        assert!(orders(&mut session.state, OrdersAction::List).contains("Kolkata"));
        assert_eq!(confirm(&mut session), "No order is waiting for confirmation");
    }

    #[test]
    fn test_place_rejects_blank_address() {
        let mut session = logged_in_session();
        let id = session.state.catalog().products()[0].id.clone();
        session.state.add_to_cart(&id, 1).unwrap();

        let err = checkout(&mut session, CheckoutAction::Place(place_args(" "))).unwrap_err();
        assert_eq!(err.user_message(), "Please provide address line 1");
        assert!(session.receipt.is_none());
        assert_eq!(orders(&mut session.state, OrdersAction::List), "No orders yet");
    }

    #[test]
    fn test_buy_now_logged_out() {
        let mut state = AppState::in_memory();
        let id = state.catalog().products()[0].id.clone();
        let out = buy_now(&mut state, &id, 2).unwrap();
        assert!(out.starts_with("Please log in"));
        assert!(out.contains(&format!("2 x product {id}")));
        assert!(state.cart().is_empty());
    }
}
