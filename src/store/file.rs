//! Flat-file store: the whole account collection is one JSON array,
//! rewritten on every mutation. The skill catalog lives in a sibling
//! `<name>.skills.json` file with the same rewrite discipline.
//!
//! Suited to single-process deployments; the Postgres store is the
//! multi-writer option.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::AccountStore;
use crate::account::Account;

pub struct JsonFileStore {
    path: PathBuf,
    catalog_path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or start) a store at `path`. A missing file is an empty
    /// collection; it is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let catalog_path = catalog_path_for(&path);
        Self {
            path,
            catalog_path,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Account>> {
        load_json(&self.path).await
    }

    async fn persist(&self, accounts: &[Account]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(accounts).context("failed to serialize accounts")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!(
            accounts = accounts.len(),
            path = %self.path.display(),
            "account collection rewritten"
        );
        Ok(())
    }
}

fn catalog_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_stem()
        .map_or_else(|| "accounts".to_string(), |s| s.to_string_lossy().into_owned());
    name.push_str(".skills.json");
    path.with_file_name(name)
}

async fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(json) => {
            serde_json::from_str(&json).with_context(|| format!("corrupt {}", path.display()))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

#[async_trait]
impl AccountStore for JsonFileStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let _guard = self.lock.lock().await;
        let accounts = self.load().await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.username == username))
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>> {
        let _guard = self.lock.lock().await;
        let accounts = self.load().await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.username == identifier || account.email == identifier))
    }

    async fn find_by_otp(&self, otp: &str) -> Result<Option<Account>> {
        if otp.is_empty() {
            return Ok(None);
        }
        let _guard = self.lock.lock().await;
        let accounts = self.load().await?;
        Ok(accounts.into_iter().find(|account| account.otp == otp))
    }

    async fn find_by_any_skill(&self, skills: &[String]) -> Result<Vec<Account>> {
        let _guard = self.lock.lock().await;
        let accounts = self.load().await?;
        Ok(accounts
            .into_iter()
            .filter(|account| account.skills.iter().any(|skill| skills.contains(skill)))
            .collect())
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut accounts = self.load().await?;
        if accounts.iter().any(|existing| {
            existing.username == account.username || existing.email == account.email
        }) {
            bail!(
                "duplicate username or email: {} / {}",
                account.username,
                account.email
            );
        }
        accounts.push(account.clone());
        self.persist(&accounts).await
    }

    async fn save(&self, account: &Account) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut accounts = self.load().await?;
        let Some(slot) = accounts
            .iter_mut()
            .find(|existing| existing.username == account.username)
        else {
            bail!("no such account: {}", account.username);
        };
        *slot = account.clone();
        self.persist(&accounts).await
    }

    async fn predefined_skills(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        load_json(&self.catalog_path).await
    }

    async fn save_predefined_skills(&self, skills: &[String]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let json = serde_json::to_string_pretty(skills).context("failed to serialize catalog")?;
        tokio::fs::write(&self.catalog_path, json)
            .await
            .with_context(|| format!("failed to write {}", self.catalog_path.display()))
    }

    async fn ping(&self) -> Result<()> {
        // Readable-or-absent is healthy; a corrupt file is not.
        let _guard = self.lock.lock().await;
        self.load().await.map(|_| ())
    }
}
