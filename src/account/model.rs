//! Persisted account record and its profile sub-resources.
//!
//! The flat-file store serializes these types verbatim, so the serde
//! field names are the on-disk format. API responses use dedicated
//! types; credentials never leave this record through serde defaults.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One persisted account, uniquely keyed by `username` and by `email`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub email: String,
    /// Argon2id PHC string, never a plaintext password.
    pub password_hash: String,
    pub college_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Current one-time code; empty once consumed.
    pub otp: String,
    /// Flipped by OTP confirmation; gates login.
    pub verified: bool,
    pub is_banned: bool,
    #[serde(default)]
    pub reset_state: ResetState,
    /// Last issued bearer token; empty means never logged in.
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experiences: Vec<WorkExperience>,
}

impl Account {
    /// True once login has stored a session token on the record.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

/// Password-reset confirmation progress for one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetState {
    /// No reset requested.
    #[default]
    None,
    /// Forgot-password issued a code that has not been confirmed yet.
    OtpIssued,
    /// The reset code was confirmed; a new password may be applied.
    Confirmed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub branch: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: u32,
    pub company_name: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    fn account() -> Account {
        Account {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            college_name: "Example College".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            otp: "abc".to_string(),
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

    #[test]
    fn serializes_camel_case_keys() -> Result<()> {
        let value = serde_json::to_value(account())?;
        assert!(value.get("collegeName").is_some());
        assert!(value.get("isBanned").is_some());
        assert!(value.get("workExperiences").is_some());
        assert!(value.get("college_name").is_none());
        Ok(())
    }

    #[test]
    fn optional_fields_default_on_deserialize() -> Result<()> {
        // Records written before the reset/role fields existed must load.
        let value = serde_json::json!({
            "username": "bob",
            "email": "bob@example.edu",
            "passwordHash": "$argon2id$stub",
            "collegeName": "Example College",
            "firstName": "Bob",
            "lastName": "Doe",
            "otp": "",
            "verified": true,
            "isBanned": false,
        });
        let account: Account = serde_json::from_value(value)?;
        assert_eq!(account.reset_state, ResetState::None);
        assert_eq!(account.role, Role::Member);
        assert!(account.auth_token.is_empty());
        assert!(account.skills.is_empty());
        Ok(())
    }

    #[test]
    fn reset_state_round_trips_as_snake_case() -> Result<()> {
        let value = serde_json::to_value(ResetState::OtpIssued)?;
        let tag = value.as_str().context("reset state should be a string")?;
        assert_eq!(tag, "otp_issued");
        let decoded: ResetState = serde_json::from_value(value)?;
        assert_eq!(decoded, ResetState::OtpIssued);
        Ok(())
    }

    #[test]
    fn is_authenticated_tracks_auth_token() {
        let mut account = account();
        assert!(!account.is_authenticated());
        account.auth_token = "token".to_string();
        assert!(account.is_authenticated());
    }
}
