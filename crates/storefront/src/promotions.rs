//! Home-page promotions: flash-deal countdown, hero carousel and the
//! newsletter prompt.
//!
//! None of these touch the cart, wishlist or order stores.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use premium_core::{Email, EmailError};

use crate::models::session::keys;
use crate::storage::KeyValueStore;

/// How often the hero carousel advances on its own.
pub const HERO_ROTATE_INTERVAL: Duration = Duration::from_secs(5);

/// Delay before the newsletter prompt appears.
pub const NEWSLETTER_DELAY: Duration = Duration::from_secs(5);

/// Discount promised to newsletter subscribers, in percent.
pub const NEWSLETTER_DISCOUNT_PERCENT: u8 = 10;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;

/// Time left on today's flash deals, counted down one second per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashDealCountdown {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl Default for FlashDealCountdown {
    fn default() -> Self {
        Self::new(23, 59, 59)
    }
}

impl FlashDealCountdown {
    /// A countdown starting at `hours:minutes:seconds`.
    ///
    /// Minutes and seconds above 59 are clamped.
    #[must_use]
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes: minutes.min(59),
            seconds: seconds.min(59),
        }
    }

    /// A countdown with `secs` seconds left.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self {
            hours: secs / SECONDS_PER_HOUR,
            minutes: (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: secs % SECONDS_PER_MINUTE,
        }
    }

    /// The countdown as it will read after `elapsed` more time.
    #[must_use]
    pub fn after(self, elapsed: Duration) -> Self {
        let elapsed = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);
        Self::from_secs(self.remaining_secs().saturating_sub(elapsed))
    }

    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.hours
            .saturating_mul(SECONDS_PER_HOUR)
            .saturating_add(self.minutes * SECONDS_PER_MINUTE + self.seconds)
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Take one second off, borrowing from minutes then hours. Stays at zero.
    pub fn tick(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else if self.hours > 0 {
            self.hours -= 1;
            self.minutes = 59;
            self.seconds = 59;
        }
    }
}

impl fmt::Display for FlashDealCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// One banner of the hero carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta: &'static str,
}

pub static HERO_SLIDES: [HeroSlide; 3] = [
    HeroSlide {
        title: "Flash Sale Today",
        subtitle: "Up to 25% off on selected items",
        cta: "Shop Now",
    },
    HeroSlide {
        title: "New Fashion Collection",
        subtitle: "Discover the latest trends",
        cta: "Explore",
    },
    HeroSlide {
        title: "Premium Accessories",
        subtitle: "Elevate your style",
        cta: "View Collection",
    },
];

/// Rotating hero banner position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeroCarousel {
    index: usize,
}

impl HeroCarousel {
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> &'static HeroSlide {
        &HERO_SLIDES[self.index]
    }

    /// Advance one slide, wrapping to the first.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> &'static HeroSlide {
        self.index = (self.index + 1) % HERO_SLIDES.len();
        self.current()
    }

    /// Go back one slide, wrapping to the last.
    pub fn prev(&mut self) -> &'static HeroSlide {
        self.index = (self.index + HERO_SLIDES.len() - 1) % HERO_SLIDES.len();
        self.current()
    }

    /// Jump to a slide. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        if index < HERO_SLIDES.len() {
            self.index = index;
        } else {
            tracing::debug!(index, "Ignoring out-of-range slide");
        }
    }
}

/// Once-per-session newsletter signup prompt.
///
/// Seen-state lives in session storage, so it resets with the session.
#[derive(Debug, Clone)]
pub struct NewsletterPrompt {
    session: Arc<dyn KeyValueStore>,
}

impl NewsletterPrompt {
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>) -> Self {
        Self { session }
    }

    /// Whether the prompt has already been shown and closed this session.
    ///
    /// An unreadable flag counts as seen so the prompt never nags twice.
    #[must_use]
    pub fn seen(&self) -> bool {
        match self.session.get(keys::NEWSLETTER_SEEN) {
            Ok(flag) => flag.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read newsletter flag");
                true
            }
        }
    }

    #[must_use]
    pub fn should_show(&self) -> bool {
        !self.seen()
    }

    /// Close the prompt without subscribing.
    pub fn dismiss(&self) {
        if let Err(e) = self.session.set(keys::NEWSLETTER_SEEN, "true") {
            tracing::error!(error = %e, "Failed to store newsletter flag");
        }
    }

    /// Subscribe an email address and close the prompt.
    ///
    /// No mail is sent; the address is only validated.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the address does not parse; the prompt stays
    /// open.
    pub fn subscribe(&self, email: &str) -> Result<Email, EmailError> {
        let email = Email::parse(email)?;
        tracing::info!(email = %email, "Newsletter subscription");
        self.dismiss();
        Ok(email)
    }
}
