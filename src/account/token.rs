//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed claims carrying the identity fields clients
//! display without a round-trip. The signing secret is supplied
//! out-of-band and held behind `secrecy`.

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use super::model::Account;

pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub email: String,
    #[serde(rename = "collegeName")]
    pub college_name: String,
    /// Issued at (unix seconds).
    pub iat: u64,
    /// Expiry (unix seconds).
    pub exp: u64,
}

/// Signs and verifies session tokens with a server-held HMAC secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: SecretString,
    ttl_seconds: u64,
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: SecretString, ttl_seconds: u64) -> Self {
        Self {
            secret,
            ttl_seconds,
        }
    }

    /// Issue a token for a freshly authenticated account.
    ///
    /// # Errors
    ///
    /// Returns an error if claim serialization or signing fails.
    pub fn sign(&self, account: &Account) -> Result<String> {
        let now = now_unix_seconds();
        let claims = Claims {
            username: account.username.clone(),
            email: account.email.clone(),
            college_name: account.college_name.clone(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::default(), &claims, &key).context("failed to sign session token")
    }

    /// Verify a presented token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed, tampered, or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let data = decode::<Claims>(token, &key, &Validation::default())
            .context("invalid session token")?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret must not appear in logs.
        f.debug_struct("TokenSigner")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
