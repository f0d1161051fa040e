//! Checkout error types.

use thiserror::Error;

use premium_core::OrderId;

use super::form::Field;

/// Reasons a checkout step is refused.
///
/// None of these create an order or touch the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("please log in to continue")]
    NotAuthenticated,

    #[error("please provide {0}")]
    MissingField(Field),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: Field, reason: &'static str },

    /// The previous order has not been acknowledged yet.
    #[error("order {0} is awaiting confirmation")]
    AwaitingAcknowledgment(OrderId),
}
