//! Interactive shell: one line, one command, until `exit` or end of input.

use std::io::Write;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use premium_storefront::promotions::NEWSLETTER_DELAY;

use crate::commands::{Commands, Session, promo};

#[derive(Parser)]
#[command(name = "premium", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Store(Commands),
    /// Leave the shell
    #[command(visible_alias = "quit")]
    Exit,
}

/// Errors splitting a line into words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("trailing backslash")]
    TrailingEscape,
}

/// Split a line into words, honouring single quotes, double quotes and
/// backslash escapes outside single quotes.
pub fn split_line(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), _) => current.push(c),
            (_, '\\') => {
                current.push(chars.next().ok_or(SplitError::TrailingEscape)?);
                in_word = true;
            }
            (Some(_), _) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, _) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[allow(clippy::print_stdout)]
fn print_out(text: &str) {
    println!("{text}");
}

#[allow(clippy::print_stdout)]
fn prompt(session: &Session) -> std::io::Result<()> {
    let cart = session.state.cart().cart_items_count();
    let liked = session.state.wishlist().len();
    let user = session
        .state
        .auth()
        .user()
        .map_or_else(|| "guest".to_string(), |u| u.initials());
    print!("premium [{user} | cart {cart} | wishlist {liked}]> ");
    std::io::stdout().flush()
}

/// Read commands from stdin until `exit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if the terminal cannot be read or written.
pub async fn run(session: &mut Session) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut newsletter_announced = false;

    print_out("Welcome to Premium. Type `help` for commands, `exit` to leave.");
    tracing::info!("Shell session started");

    loop {
        if !newsletter_announced
            && session.started().elapsed() >= NEWSLETTER_DELAY
            && session.state.newsletter().should_show()
        {
            print_out(&promo::newsletter_prompt());
            newsletter_announced = true;
        }

        prompt(session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let words = match split_line(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                print_out(&format!("Could not read that line: {e}"));
                continue;
            }
        };

        match ShellLine::try_parse_from(words) {
            Ok(ShellLine {
                command: ShellCommand::Exit,
            }) => break,
            Ok(ShellLine {
                command: ShellCommand::Store(command),
            }) => match session.execute(command).await {
                Ok(output) if output.is_empty() => {}
                Ok(output) => print_out(&output),
                Err(e) => {
                    tracing::debug!(error = %e, "Command refused");
                    print_out(&e.user_message());
                }
            },
            // Also covers `help` and `--help`
            Err(e) => print_out(e.to_string().trim_end()),
        }
    }

    tracing::info!("Shell session ended");
    print_out("Bye!");
    Ok(())
}
