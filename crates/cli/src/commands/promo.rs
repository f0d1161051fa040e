//! Flash deals, hero banner and newsletter commands.

use std::io::Write;
use std::time::Duration;

use premium_storefront::AppState;
use premium_storefront::promotions::{
    FlashDealCountdown, HERO_SLIDES, HeroCarousel, NEWSLETTER_DISCOUNT_PERCENT,
};

use super::NewsletterAction;
use super::catalog::product_row;

pub fn deals(state: &AppState, countdown: FlashDealCountdown) -> String {
    let deals = state.catalog().flash_deals();
    let mut lines = vec![if countdown.is_expired() {
        "Flash deals have ended".to_string()
    } else {
        format!("Flash deals end in {countdown}")
    }];
    if deals.is_empty() {
        lines.push("No flash deals today".to_string());
    } else {
        lines.extend(deals.into_iter().map(product_row));
    }
    lines.join("\n")
}

/// Redraw the countdown every second until Ctrl+C or expiry.
///
/// # Errors
///
/// Returns an I/O error if stdout cannot be written.
#[allow(clippy::print_stdout)]
pub async fn watch_deals(mut countdown: FlashDealCountdown) -> std::io::Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = interval.tick() => {
                print!("\rFlash deals end in {countdown} ");
                stdout.flush()?;
                if countdown.is_expired() {
                    break;
                }
                countdown.tick();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    println!();
    tracing::debug!(remaining = %countdown, "Stopped watching deals");
    Ok(())
}

pub fn hero(carousel: &HeroCarousel) -> String {
    let slide = carousel.current();
    format!(
        "[{}/{}] {}\n{}\n> {}",
        carousel.index() + 1,
        HERO_SLIDES.len(),
        slide.title,
        slide.subtitle,
        slide.cta
    )
}

/// The prompt text shown to shoppers who have not closed it yet.
pub fn newsletter_prompt() -> String {
    format!(
        "Get {NEWSLETTER_DISCOUNT_PERCENT}% off your first order! \
         Run `newsletter subscribe <email>` or `newsletter dismiss`."
    )
}

/// Run a newsletter subcommand.
///
/// # Errors
///
/// Returns `AppError::Newsletter` for a malformed address.
pub fn newsletter(
    state: &AppState,
    action: NewsletterAction,
) -> premium_storefront::Result<String> {
    let prompt = state.newsletter();
    Ok(match action {
        NewsletterAction::Show if prompt.should_show() => newsletter_prompt(),
        NewsletterAction::Show => "You have already seen our newsletter offer".to_string(),
        NewsletterAction::Subscribe { email } => {
            let email = prompt.subscribe(&email)?;
            format!(
                "Thanks for subscribing! Check {email} for your {NEWSLETTER_DISCOUNT_PERCENT}% discount code."
            )
        }
        NewsletterAction::Dismiss => {
            prompt.dismiss();
            "Maybe next time".to_string()
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deals_show_countdown() {
        let state = AppState::in_memory();
        let out = deals(&state, FlashDealCountdown::default());
        assert!(out.starts_with("Flash deals end in 23:59:59"));
    }

    #[test]
    fn test_deals_expired() {
        let state = AppState::in_memory();
        let out = deals(&state, FlashDealCountdown::from_secs(0));
        assert!(out.starts_with("Flash deals have ended"));
    }

    #[test]
    fn test_hero_shows_position() {
        let mut carousel = HeroCarousel::new();
        carousel.prev();
        assert!(hero(&carousel).starts_with("[3/3] Premium Accessories"));
    }

    #[test]
    fn test_newsletter_once() {
        let state = AppState::in_memory();
        assert_eq!(
            newsletter(&state, NewsletterAction::Show).unwrap(),
            newsletter_prompt()
        );
        newsletter(&state, NewsletterAction::Dismiss).unwrap();
        assert!(
            newsletter(&state, NewsletterAction::Show)
                .unwrap()
                .starts_with("You have already seen")
        );
    }

    #[test]
    fn test_newsletter_invalid_email() {
        let state = AppState::in_memory();
        let err = newsletter(
            &state,
            NewsletterAction::Subscribe {
                email: "nope".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, premium_storefront::AppError::Newsletter(_)));
        assert_eq!(err.user_message(), "Invalid email address");
        assert!(state.newsletter().should_show());
    }
}
