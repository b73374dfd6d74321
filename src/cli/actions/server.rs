use crate::{
    account::{AccountService, TokenSigner},
    api,
    notify::LogNotifier,
    store::{AccountStore, JsonFileStore, PgStore},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    /// Postgres DSN; `None` selects the flat-file store.
    pub dsn: Option<String>,
    pub data_file: String,
    pub token_secret: SecretString,
    pub token_ttl_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the store cannot be opened or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store: Arc<dyn AccountStore> = match &args.dsn {
        Some(dsn) => {
            let parsed = Url::parse(dsn).context("invalid database DSN")?;
            info!(host = ?parsed.host_str(), "using postgres store");
            Arc::new(PgStore::connect(dsn).await?)
        }
        None => {
            info!(path = %args.data_file, "using flat-file store");
            Arc::new(JsonFileStore::new(&args.data_file))
        }
    };

    let signer = TokenSigner::new(args.token_secret, args.token_ttl_seconds);
    let service = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(LogNotifier),
        signer,
    ));

    api::serve(args.port, service, store).await
}
