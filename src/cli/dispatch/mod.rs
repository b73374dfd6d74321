//! Map validated CLI matches to an action.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches.get_one::<String>("dsn").cloned();
    let data_file = matches
        .get_one::<String>("data-file")
        .cloned()
        .unwrap_or_else(|| "accounts.json".to_string());
    let token_secret = matches
        .get_one::<String>("token-secret")
        .cloned()
        .context("missing required argument: --token-secret")?;
    let token_ttl_seconds = matches
        .get_one::<u64>("token-ttl-seconds")
        .copied()
        .unwrap_or(crate::account::token::DEFAULT_TOKEN_TTL_SECONDS);

    Ok(Action::Server(Args {
        port,
        dsn,
        data_file,
        token_secret: SecretString::from(token_secret),
        token_ttl_seconds,
    }))
}
