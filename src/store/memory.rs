//! In-memory store, the canonical backend for tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::AccountStore;
use crate::account::Account;

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    catalog: Vec<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.get(username).cloned())
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .accounts
            .values()
            .find(|account| account.username == identifier || account.email == identifier)
            .cloned())
    }

    async fn find_by_otp(&self, otp: &str) -> Result<Option<Account>> {
        if otp.is_empty() {
            // Consumed codes are stored as "", which must never match.
            return Ok(None);
        }
        let inner = self.inner.lock().await;
        Ok(inner
            .accounts
            .values()
            .find(|account| account.otp == otp)
            .cloned())
    }

    async fn find_by_any_skill(&self, skills: &[String]) -> Result<Vec<Account>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .accounts
            .values()
            .filter(|account| account.skills.iter().any(|skill| skills.contains(skill)))
            .cloned()
            .collect())
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.accounts.contains_key(&account.username) {
            bail!("duplicate username: {}", account.username);
        }
        if inner
            .accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            bail!("duplicate email: {}", account.email);
        }
        inner
            .accounts
            .insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.accounts.contains_key(&account.username) {
            bail!("no such account: {}", account.username);
        }
        inner
            .accounts
            .insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn predefined_skills(&self) -> Result<Vec<String>> {
        let inner = self.inner.lock().await;
        Ok(inner.catalog.clone())
    }

    async fn save_predefined_skills(&self, skills: &[String]) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.catalog = skills.to_vec();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::model::{ResetState, Role};

    fn account(username: &str, email: &str) -> Account {
        Account {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            college_name: "Example College".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            otp: format!("otp-{username}"),
            verified: false,
            is_banned: false,
            reset_state: ResetState::None,
            auth_token: String::new(),
            role: Role::Member,
            skills: Vec::new(),
            education: Vec::new(),
            work_experiences: Vec::new(),
        }
    }

    #[tokio::test]
    async fn insert_then_lookup_by_each_key() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(&account("alice", "alice@example.edu")).await?;

        assert!(store.find_by_username("alice").await?.is_some());
        assert!(store
            .find_by_username_or_email("alice@example.edu")
            .await?
            .is_some());
        assert!(store.find_by_otp("otp-alice").await?.is_some());
        assert!(store.find_by_username("bob").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn insert_refuses_duplicate_username_and_email() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(&account("alice", "alice@example.edu")).await?;

        assert!(store
            .insert(&account("alice", "other@example.edu"))
            .await
            .is_err());
        assert!(store
            .insert(&account("bob", "alice@example.edu"))
            .await
            .is_err());
        Ok(())
    }

    #[tokio::test]
    async fn save_overwrites_whole_record() -> Result<()> {
        let store = MemoryStore::new();
        let mut record = account("alice", "alice@example.edu");
        store.insert(&record).await?;

        record.verified = true;
        record.skills.push("Rust".to_string());
        store.save(&record).await?;

        let loaded = store
            .find_by_username("alice")
            .await?
            .expect("account should exist");
        assert!(loaded.verified);
        assert_eq!(loaded.skills, vec!["Rust".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn save_refuses_unknown_account() {
        let store = MemoryStore::new();
        let result = store.save(&account("ghost", "ghost@example.edu")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn empty_otp_never_matches() -> Result<()> {
        let store = MemoryStore::new();
        let mut record = account("alice", "alice@example.edu");
        record.otp = String::new();
        store.insert(&record).await?;

        assert!(store.find_by_otp("").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn find_by_any_skill_matches_exactly() -> Result<()> {
        let store = MemoryStore::new();
        let mut record = account("alice", "alice@example.edu");
        record.skills = vec!["Rust".to_string(), "Go".to_string()];
        store.insert(&record).await?;
        store.insert(&account("bob", "bob@example.edu")).await?;

        let hits = store.find_by_any_skill(&["Go".to_string()]).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "alice");

        let misses = store.find_by_any_skill(&["go".to_string()]).await?;
        assert!(misses.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn catalog_round_trips() -> Result<()> {
        let store = MemoryStore::new();
        assert!(store.predefined_skills().await?.is_empty());

        store
            .save_predefined_skills(&["Rust".to_string(), "SQL".to_string()])
            .await?;
        assert_eq!(
            store.predefined_skills().await?,
            vec!["Rust".to_string(), "SQL".to_string()]
        );
        Ok(())
    }
}
