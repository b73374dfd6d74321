//! Persistence seam for account records and the skill catalog.
//!
//! Every backend exposes the same lookup/persist contract: records are
//! read whole and written whole, with no partial-field updates. The
//! service layer owns uniqueness and lifecycle rules; stores only move
//! records.

pub mod file;
pub mod memory;
pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;

use crate::account::Account;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Match either the username or the email field against one identifier.
    async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>>;

    async fn find_by_otp(&self, otp: &str) -> Result<Option<Account>>;

    /// Accounts holding at least one of the given skills (exact match).
    async fn find_by_any_skill(&self, skills: &[String]) -> Result<Vec<Account>>;

    /// Persist a new record. Uniqueness of username/email is checked by
    /// the service before calling; backends with native constraints
    /// still refuse duplicates.
    async fn insert(&self, account: &Account) -> Result<()>;

    /// Overwrite the record identified by `account.username` in place.
    async fn save(&self, account: &Account) -> Result<()>;

    async fn predefined_skills(&self) -> Result<Vec<String>>;

    async fn save_predefined_skills(&self, skills: &[String]) -> Result<()>;

    /// Cheap reachability probe for `/health`.
    async fn ping(&self) -> Result<()>;
}
