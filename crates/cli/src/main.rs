//! Premium storefront shell.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive shopping session
//! premium
//!
//! # One-shot commands
//! premium catalog --search headphones
//! premium orders list
//! ```
//!
//! The cart and wishlist live as long as the session, so a one-shot
//! command starts and ends with an empty cart. The logged-in profile and
//! order history are kept under `PREMIUM_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use premium_storefront::config::{LogFormat, StorefrontConfig};
use premium_storefront::{AppError, AppState};

mod commands;
mod shell;

use commands::{Commands, Session};

const DEFAULT_LOG_FILTER: &str = "premium_storefront=info,premium_cli=info";

#[derive(Parser)]
#[command(name = "premium")]
#[command(author, version, about = "Premium storefront shopping shell")]
struct Cli {
    /// Command to run; starts the interactive shell when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront refused the command.
    #[error(transparent)]
    App(#[from] AppError),

    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message safe to print for the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Io(_) => "Terminal error".to_string(),
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so command output on
/// stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map_or_else(|_| LogFormat::default(), |c| c.log_format),
    );

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e).into()),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{}", e.user_message());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening storefront");
    let mut session = Session::new(AppState::open(config)?);

    match cli.command {
        None => shell::run(&mut session).await?,
        Some(command) => {
            let output = session.execute(command).await?;
            if !output.is_empty() {
                #[allow(clippy::print_stdout)]
                {
                    println!("{output}");
                }
            }
        }
    }
    Ok(())
}
