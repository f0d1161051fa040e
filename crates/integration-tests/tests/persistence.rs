//! Durable records surviving a restart.

use premium_core::{PaymentMode, ProductId};
use premium_integration_tests::TestContext;
use premium_storefront::services::auth::ProfileUpdate;
use premium_storefront::services::checkout::CheckoutForm;

#[test]
fn test_profile_and_orders_survive_restart() {
    let mut ctx = TestContext::new();
    ctx.login("keeper@shop.io");
    ctx.state.add_to_cart(&ProductId::new("6"), 1).expect("add");
    let receipt = ctx
        .state
        .place_order(&CheckoutForm {
            address1: "1 Park Street".to_string(),
            pincode: "700001".to_string(),
            payment_mode: PaymentMode::Cod,
            ..CheckoutForm::default()
        })
        .expect("order");
    let order_id = receipt.order_id().clone();
    ctx.state.acknowledge_order(receipt);
    ctx.state.toggle_wishlist(&ProductId::new("6")).expect("like");

    ctx.restart();

    let user = ctx.state.auth().user().expect("profile restored");
    assert_eq!(user.email.as_str(), "keeper@shop.io");
    assert_eq!(ctx.state.orders().len(), 1);
    let order = ctx.state.orders().find(&order_id).expect("order restored");
    assert_eq!(order.address().city, "Kolkata");
    assert_eq!(order.item_count(), 1);

    // Session-only stores start over
    assert!(ctx.state.cart().is_empty());
    assert!(ctx.state.wishlist().is_empty());
}

#[test]
fn test_persisted_auth_record_layout() {
    let mut ctx = TestContext::new();
    ctx.login("Layout@Shop.io");

    let raw = std::fs::read_to_string(ctx.dir.path().join("app_auth.json")).expect("auth file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(json["email"], "layout@shop.io");
    assert_eq!(json["name"], "layout");
    assert!(json["loggedAt"].is_i64());
    assert!(json["token"].is_string());
}

#[test]
fn test_logout_and_clear_are_durable() {
    let mut ctx = TestContext::new();
    ctx.login("gone@shop.io");
    ctx.state.logout();
    ctx.state.orders_mut().clear_orders();

    ctx.restart();
    assert!(!ctx.state.auth().is_authenticated());
    assert!(ctx.state.orders().is_empty());
}

#[test]
fn test_profile_update_persists() {
    let mut ctx = TestContext::new();
    ctx.login("old@shop.io");
    ctx.state
        .update_profile(ProfileUpdate {
            email: Some("new@shop.io".to_string()),
            age: Some(31),
            ..ProfileUpdate::default()
        })
        .expect("update");

    ctx.restart();
    let user = ctx.state.auth().user().expect("profile restored");
    assert_eq!(user.email.as_str(), "new@shop.io");
    assert_eq!(user.age, Some(31));
}

#[test]
fn test_corrupt_records_start_empty() {
    let mut ctx = TestContext::new();
    std::fs::write(ctx.dir.path().join("app_auth.json"), "{not json").expect("write");
    std::fs::write(ctx.dir.path().join("app_orders.json"), "42").expect("write");

    ctx.restart();
    assert!(!ctx.state.auth().is_authenticated());
    assert!(ctx.state.orders().is_empty());
}
