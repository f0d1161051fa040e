//! Shell commands and the session they act on.
//!
//! Every command renders its result as text; the caller decides where it is
//! printed. Only `deals --watch` writes directly, since it redraws a live
//! countdown.

pub mod account;
pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod promo;

use std::time::Instant;

use clap::{Args, Subcommand};

use premium_core::{Bank, Gender, PaymentMode};
use premium_storefront::AppState;
use premium_storefront::promotions::{FlashDealCountdown, HERO_ROTATE_INTERVAL, HERO_SLIDES};
use premium_storefront::services::checkout::PlacedOrder;

use crate::CliError;

/// Storefront commands, available both one-shot and inside the shell.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List products, optionally filtered
    Catalog {
        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category (`All` for every category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List product categories
    Categories,
    /// Show a product with related items
    Product {
        /// Product ID
        id: String,
    },
    /// Show flash deals and the time left on them
    Deals {
        /// Keep redrawing the countdown until Ctrl+C or expiry
        #[arg(long)]
        watch: bool,
    },
    /// Show or rotate the hero banner
    Hero {
        #[command(subcommand)]
        action: Option<HeroAction>,
    },
    /// Show or edit the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Show or edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },
    /// Log in (display-only, no password check)
    Login(LoginArgs),
    /// Create an account and log in
    Signup(SignupArgs),
    /// Log out
    Logout,
    /// Show or edit your profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Review the cart for checkout, or place the order
    Checkout {
        #[command(subcommand)]
        action: Option<CheckoutAction>,
    },
    /// Add a product and go straight to checkout
    BuyNow {
        /// Product ID
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Acknowledge the order just placed and take its items out of the cart
    Confirm,
    /// Show or clear order history
    Orders {
        #[command(subcommand)]
        action: Option<OrdersAction>,
    },
    /// Newsletter signup
    Newsletter {
        #[command(subcommand)]
        action: Option<NewsletterAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum HeroAction {
    /// Show the current slide
    Show,
    /// Next slide
    Next,
    /// Previous slide
    Prev,
    /// Jump to a slide (0-based)
    Select { index: usize },
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show lines and totals
    Show,
    /// Add units of a product
    Add {
        /// Product ID
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// Show liked products
    Show,
    /// Like or unlike a product
    Toggle {
        /// Product ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,

    /// Display name (defaults to the part of the email before `@`)
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(short, long)]
    pub age: Option<u32>,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(short, long)]
    pub name: String,

    #[arg(short, long)]
    pub email: String,

    #[arg(short, long)]
    pub password: String,

    #[arg(short, long)]
    pub confirm_password: String,

    #[arg(short, long)]
    pub gender: Option<Gender>,

    #[arg(short, long)]
    pub age: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the logged-in profile
    Show,
    /// Change profile fields
    Update {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        gender: Option<Gender>,

        #[arg(short, long)]
        age: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CheckoutAction {
    /// Check the cart and login, and show totals
    Review,
    /// Submit the checkout form
    Place(PlaceArgs),
}

#[derive(Debug, Args)]
pub struct PlaceArgs {
    #[arg(long)]
    pub address1: String,

    #[arg(long, default_value = "")]
    pub address2: String,

    #[arg(long, default_value = "")]
    pub landmark: String,

    #[arg(long)]
    pub pincode: String,

    /// debit, credit, upi, netbanking or cod
    #[arg(long, default_value = "debit")]
    pub payment: PaymentMode,

    #[arg(long, default_value = "")]
    pub card_number: String,

    /// MM/YY
    #[arg(long, default_value = "")]
    pub expiry: String,

    #[arg(long, default_value = "")]
    pub cvv: String,

    #[arg(long, default_value = "")]
    pub upi_id: String,

    /// sbi, hdfc, icici or axis
    #[arg(long)]
    pub bank: Option<Bank>,
}

#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List orders, most recent first
    List,
    /// Delete order history
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum NewsletterAction {
    /// Show the signup prompt if it has not been closed this session
    Show,
    /// Subscribe and close the prompt
    Subscribe { email: String },
    /// Close the prompt
    Dismiss,
}

/// One shopping session: the storefront state plus what the shell remembers
/// between commands.
#[derive(Debug)]
pub struct Session {
    pub state: AppState,
    /// Receipt of an order placed but not yet confirmed.
    pub receipt: Option<PlacedOrder>,
    started: Instant,
    countdown: FlashDealCountdown,
    hero_shown_at: Instant,
}

impl Session {
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let now = Instant::now();
        Self {
            state,
            receipt: None,
            started: now,
            countdown: FlashDealCountdown::default(),
            hero_shown_at: now,
        }
    }

    /// Flash-deal time left, counted from the start of the session.
    #[must_use]
    pub fn countdown(&self) -> FlashDealCountdown {
        self.countdown.after(self.started.elapsed())
    }

    #[must_use]
    pub const fn started(&self) -> Instant {
        self.started
    }

    /// Run one command and render its output.
    ///
    /// # Errors
    ///
    /// Returns `CliError` when the storefront refuses the command.
    pub async fn execute(&mut self, command: Commands) -> Result<String, CliError> {
        // Arguments stay out of the log: signup carries a password
        tracing::debug!("Executing command");
        let output = match command {
            Commands::Catalog { search, category } => {
                catalog::list(&self.state, search.as_deref(), category.as_deref())
            }
            Commands::Categories => catalog::categories(&self.state),
            Commands::Product { id } => catalog::product(&self.state, &id.into())?,
            Commands::Deals { watch: false } => promo::deals(&self.state, self.countdown()),
            Commands::Deals { watch: true } => {
                promo::watch_deals(self.countdown()).await?;
                String::new()
            }
            Commands::Hero { action } => self.hero(action.unwrap_or(HeroAction::Show)),
            Commands::Cart { action } => cart::cart(&mut self.state, action.unwrap_or(CartAction::Show))?,
            Commands::Wishlist { action } => {
                cart::wishlist(&mut self.state, action.unwrap_or(WishlistAction::Show))?
            }
            Commands::Login(args) => account::login(&mut self.state, args)?,
            Commands::Signup(args) => account::signup(&mut self.state, args)?,
            Commands::Logout => account::logout(&mut self.state),
            Commands::Profile { action } => {
                account::profile(&mut self.state, action.unwrap_or(ProfileAction::Show))?
            }
            Commands::Checkout { action } => {
                checkout::checkout(self, action.unwrap_or(CheckoutAction::Review))?
            }
            Commands::BuyNow { id, quantity } => checkout::buy_now(&mut self.state, &id.into(), quantity)?,
            Commands::Confirm => checkout::confirm(self),
            Commands::Orders { action } => {
                checkout::orders(&mut self.state, action.unwrap_or(OrdersAction::List))
            }
            Commands::Newsletter { action } => {
                promo::newsletter(&self.state, action.unwrap_or(NewsletterAction::Show))?
            }
        };
        Ok(output)
    }

    fn hero(&mut self, action: HeroAction) -> String {
        // The banner keeps rotating while nobody looks at it
        let rotations = self.hero_shown_at.elapsed().as_secs() / HERO_ROTATE_INTERVAL.as_secs();
        let rotations = usize::try_from(rotations).unwrap_or(0) % HERO_SLIDES.len();
        let carousel = self.state.carousel_mut();
        for _ in 0..rotations {
            carousel.next();
        }
        match action {
            HeroAction::Show => {}
            HeroAction::Next => {
                carousel.next();
            }
            HeroAction::Prev => {
                carousel.prev();
            }
            HeroAction::Select { index } => carousel.select(index),
        }
        self.hero_shown_at = Instant::now();
        promo::hero(self.state.carousel())
    }
}
