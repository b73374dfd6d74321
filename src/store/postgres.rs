//! Postgres store: one document-style row per account.
//!
//! The whole record is kept as JSONB next to the three lookup keys
//! (username, email, otp), so `save` is a single-row overwrite and the
//! read/write contract matches the flat-file backend exactly.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, Connection, PgPool, Row};
use std::time::Duration;
use tracing::{info_span, Instrument};

use super::AccountStore;
use crate::account::Account;

const SCHEMA_SQL: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS accounts (
        username TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        otp TEXT NOT NULL,
        doc JSONB NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS skill_catalog (
        position BIGINT PRIMARY KEY,
        skill TEXT NOT NULL UNIQUE
    )
    ",
    "CREATE INDEX IF NOT EXISTS accounts_otp_idx ON accounts (otp)",
];

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established or the schema
    /// statements fail.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;

        for statement in SCHEMA_SQL {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .context("failed to ensure account schema")?;
        }

        Ok(Self { pool })
    }

    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_doc(&self, query: &'static str, bind: &str) -> Result<Option<Account>> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to query account")?;

        row.map(|row| decode_doc(row.get("doc"))).transpose()
    }
}

fn decode_doc(doc: String) -> Result<Account> {
    serde_json::from_str(&doc).context("corrupt account document")
}

fn encode_doc(account: &Account) -> Result<String> {
    serde_json::to_string(account).context("failed to serialize account document")
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.fetch_one_doc(
            "SELECT doc::text AS doc FROM accounts WHERE username = $1",
            username,
        )
        .await
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Account>> {
        self.fetch_one_doc(
            "SELECT doc::text AS doc FROM accounts WHERE username = $1 OR email = $1",
            identifier,
        )
        .await
    }

    async fn find_by_otp(&self, otp: &str) -> Result<Option<Account>> {
        if otp.is_empty() {
            return Ok(None);
        }
        self.fetch_one_doc("SELECT doc::text AS doc FROM accounts WHERE otp = $1", otp)
            .await
    }

    async fn find_by_any_skill(&self, skills: &[String]) -> Result<Vec<Account>> {
        let query = "SELECT doc::text AS doc FROM accounts WHERE doc->'skills' ?| $1::text[]";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let rows = sqlx::query(query)
            .bind(skills)
            .fetch_all(&self.pool)
            .instrument(span)
            .await
            .context("failed to query accounts by skill")?;

        rows.into_iter()
            .map(|row| decode_doc(row.get("doc")))
            .collect()
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let query = r"
            INSERT INTO accounts (username, email, otp, doc)
            VALUES ($1, $2, $3, $4::jsonb)
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.otp)
            .bind(encode_doc(account)?)
            .execute(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                bail!(
                    "duplicate username or email: {} / {}",
                    account.username,
                    account.email
                )
            }
            Err(err) => Err(err).context("failed to insert account"),
        }
    }

    async fn save(&self, account: &Account) -> Result<()> {
        let query = r"
            UPDATE accounts
            SET email = $2,
                otp = $3,
                doc = $4::jsonb
            WHERE username = $1
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.otp)
            .bind(encode_doc(account)?)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to save account")?;

        if result.rows_affected() == 0 {
            bail!("no such account: {}", account.username);
        }
        Ok(())
    }

    async fn predefined_skills(&self) -> Result<Vec<String>> {
        let query = "SELECT skill FROM skill_catalog ORDER BY position ASC";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .instrument(span)
            .await
            .context("failed to load skill catalog")?;

        Ok(rows.into_iter().map(|row| row.get("skill")).collect())
    }

    async fn save_predefined_skills(&self, skills: &[String]) -> Result<()> {
        // Whole-catalog rewrite, mirroring the flat-file backend.
        let mut tx = self
            .pool
            .begin()
            .await
            .context("failed to begin catalog transaction")?;

        sqlx::query("DELETE FROM skill_catalog")
            .execute(&mut *tx)
            .await
            .context("failed to clear skill catalog")?;

        for (position, skill) in skills.iter().enumerate() {
            sqlx::query("INSERT INTO skill_catalog (position, skill) VALUES ($1, $2)")
                .bind(i64::try_from(position).unwrap_or(i64::MAX))
                .bind(skill)
                .execute(&mut *tx)
                .await
                .context("failed to insert catalog skill")?;
        }

        tx.commit().await.context("failed to commit skill catalog")
    }

    async fn ping(&self) -> Result<()> {
        let span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("failed to acquire database connection")?;
        conn.ping()
            .instrument(span)
            .await
            .context("failed to ping database")
    }
}
