//! Request/response types for the account endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::{Account, Education, WorkExperience};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub college_name: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyBody {
    pub otp: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordBody {
    pub username_or_email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub username: String,
    pub existing_password: String,
    pub new_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SkillBody {
    pub username: String,
    pub skill: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EducationBody {
    pub username: String,
    pub institution: String,
    pub branch: String,
    pub start_date: String,
    pub end_date: String,
}

impl EducationBody {
    pub(crate) fn into_entry(self) -> (String, Education) {
        (
            self.username,
            Education {
                institution: self.institution,
                branch: self.branch,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceBody {
    pub username: String,
    pub id: u32,
    pub company_name: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

impl WorkExperienceBody {
    pub(crate) fn into_entry(self) -> (String, WorkExperience) {
        (
            self.username,
            WorkExperience {
                id: self.id,
                company_name: self.company_name,
                position: self.position,
                description: self.description,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RetireSkillsBody {
    pub invalid_skills: Vec<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdoptSkillsBody {
    pub new_skills: Vec<String>,
}

/// Public view of an account. Credentials, the OTP, and the stored
/// session token never appear here.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub username: String,
    pub email: String,
    pub college_name: String,
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
    pub is_banned: bool,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    pub work_experiences: Vec<WorkExperience>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            email: account.email,
            college_name: account.college_name,
            first_name: account.first_name,
            last_name: account.last_name,
            verified: account.verified,
            is_banned: account.is_banned,
            skills: account.skills,
            education: account.education,
            work_experiences: account.work_experiences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::model::{ResetState, Role};
    use anyhow::{Context, Result};

    #[test]
    fn register_body_reads_camel_case() -> Result<()> {
        let body: RegisterBody = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "password": "pw",
            "confirmPassword": "pw",
            "email": "alice@example.edu",
            "collegeName": "Example College",
            "firstName": "Alice",
            "lastName": "Doe",
        }))?;
        assert_eq!(body.confirm_password, "pw");
        assert_eq!(body.college_name, "Example College");
        Ok(())
    }

    #[test]
    fn account_response_hides_credentials() -> Result<()> {
        let account = Account {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            college_name: "Example College".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            otp: "secret-code".to_string(),
            verified: true,
            is_banned: false,
            reset_state: ResetState::None,
            auth_token: "secret-token".to_string(),
            role: Role::Member,
            skills: vec!["Rust".to_string()],
            education: Vec::new(),
            work_experiences: Vec::new(),
        };

        let value = serde_json::to_value(AccountResponse::from(account))?;
        let rendered = serde_json::to_string(&value)?;
        assert!(!rendered.contains("secret-code"));
        assert!(!rendered.contains("secret-token"));
        assert!(!rendered.contains("argon2id"));

        let username = value
            .get("username")
            .and_then(serde_json::Value::as_str)
            .context("missing username")?;
        assert_eq!(username, "alice");
        assert!(value.get("collegeName").is_some());
        Ok(())
    }
}
