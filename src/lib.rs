//! # Matricula (Campus Account Service)
//!
//! `matricula` is a campus account backend. It handles registration with
//! email OTP verification, login issuing a signed bearer token, the
//! password-reset flow, and profile sub-resources (skills, education,
//! work experience).
//!
//! ## Account lifecycle
//!
//! Accounts are created unverified and must confirm the OTP mailed at
//! registration before login is allowed. Bans block login regardless of
//! verification. Password reset is a separate OTP round-trip:
//! forgot-password rotates the code, the reset endpoint only applies a
//! new password once that code has been confirmed.
//!
//! - **Single-use codes:** a confirmed OTP is cleared and cannot be
//!   replayed.
//! - **Credentials at rest:** passwords are stored as Argon2id hashes;
//!   API responses never carry the hash, the OTP, or the stored token.
//!
//! ## Authorization
//!
//! Profile mutations require the account to hold a session token. Admin
//! skill curation requires a bearer token resolving to an `admin`
//! account; unauthorized attempts return `404 Not Found` rather than
//! `403 Forbidden` to prevent account enumeration.

pub mod account;
pub mod api;
pub mod cli;
pub mod notify;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
