//! Login, signup and profile commands.

use premium_storefront::AppState;
use premium_storefront::models::UserProfile;
use premium_storefront::services::auth::{AuthError, LoginRequest, ProfileUpdate, SignupRequest};
use premium_storefront::services::checkout::Destination;

use super::{LoginArgs, ProfileAction, SignupArgs};

fn describe(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!("[{}] {}", profile.initials(), profile.name),
        format!("Email:  {}", profile.email),
    ];
    if let Some(gender) = profile.gender {
        lines.push(format!("Gender: {gender}"));
    }
    if let Some(age) = profile.age {
        lines.push(format!("Age:    {age}"));
    }
    lines.push(format!(
        "Since:  {}",
        profile.logged_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.join("\n")
}

/// Greeting after login, continuing any checkout that sent the shopper here.
fn welcome(state: &mut AppState) -> premium_storefront::Result<String> {
    let name = state
        .auth()
        .user()
        .map(|u| u.name.clone())
        .unwrap_or_default();
    let mut message = format!("Welcome, {name}!");
    if state.checkout().pending_redirect().is_some() {
        let destination = state.resume_after_login()?;
        if destination == Destination::Checkout {
            message.push_str("\nBack to checkout: run `checkout review` to see your order.");
        }
    }
    Ok(message)
}

/// # Errors
///
/// Returns `AuthError::InvalidEmail` for a malformed email.
pub fn login(state: &mut AppState, args: LoginArgs) -> premium_storefront::Result<String> {
    state.login(LoginRequest {
        email: args.email,
        name: args.name,
        gender: args.gender,
        age: args.age,
    })?;
    welcome(state)
}

/// # Errors
///
/// Returns `AuthError` for mismatched passwords or a malformed email.
pub fn signup(state: &mut AppState, args: SignupArgs) -> premium_storefront::Result<String> {
    state.signup(SignupRequest {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        gender: args.gender,
        age: args.age,
    })?;
    welcome(state)
}

pub fn logout(state: &mut AppState) -> String {
    if state.auth().is_authenticated() {
        state.logout();
        "Logged out".to_string()
    } else {
        "You are not logged in".to_string()
    }
}

/// Run a profile subcommand.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` when nobody is logged in.
pub fn profile(state: &mut AppState, action: ProfileAction) -> premium_storefront::Result<String> {
    match action {
        ProfileAction::Show => state
            .auth()
            .user()
            .map(describe)
            .ok_or_else(|| AuthError::NotAuthenticated.into()),
        ProfileAction::Update {
            name,
            email,
            gender,
            age,
        } => {
            let profile = state.update_profile(ProfileUpdate {
                name,
                email,
                gender,
                age,
            })?;
            Ok(describe(profile))
        }
    }
}
