//! The account lifecycle state machine.
//!
//! Flow Overview:
//! 1) Registration creates an unverified account and mails an OTP.
//! 2) Verification consumes the OTP and unlocks login.
//! 3) Login checks credentials, ban, and verification, then issues a
//!    signed token.
//! 4) Forgot/reset is a separate OTP round-trip gated on confirmation.
//!
//! Profile and admin operations live here too since they share the
//! store and the authenticated-account checks.

use std::sync::Arc;
use tracing::{debug, info};

use super::error::AccountError;
use super::model::{Account, Education, ResetState, Role, WorkExperience};
use super::otp::generate_otp;
use super::password::{hash_password, verify_password};
use super::token::{Claims, TokenSigner};
use crate::notify::{self, Notifier};
use crate::store::AccountStore;

/// Registration input, one field per form value.
#[derive(Clone, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub college_name: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct AccountService {
    store: Arc<dyn AccountStore>,
    notifier: Arc<dyn Notifier>,
    signer: TokenSigner,
}

impl AccountService {
    #[must_use]
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn Notifier>,
        signer: TokenSigner,
    ) -> Self {
        Self {
            store,
            notifier,
            signer,
        }
    }

    /// Register a new account and mail its verification OTP.
    ///
    /// The email is dispatched fire-and-forget: delivery failure never
    /// fails the registration.
    ///
    /// # Errors
    ///
    /// `Validation` for mismatched passwords or a malformed email,
    /// `Conflict` when the username or email is taken.
    pub async fn register(&self, request: RegisterRequest) -> Result<Account, AccountError> {
        if request.password != request.confirm_password {
            return Err(AccountError::validation(
                "Password and confirm password do not match",
            ));
        }

        if !valid_email(&request.email) {
            return Err(AccountError::validation("Invalid email"));
        }

        if self
            .store
            .find_by_username_or_email(&request.username)
            .await?
            .is_some()
            || self
                .store
                .find_by_username_or_email(&request.email)
                .await?
                .is_some()
        {
            return Err(AccountError::conflict("Username or email already exists"));
        }

        let otp = generate_otp();
        let account = Account {
            username: request.username,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            college_name: request.college_name,
            first_name: request.first_name,
            last_name: request.last_name,
            otp: otp.clone(),
            verified: false,
            is_banned: false,
            reset_state: ResetState::None,
            auth_token: String::new(),
            role: Role::Member,
            skills: Vec::new(),
            education: Vec::new(),
            work_experiences: Vec::new(),
        };

        self.store.insert(&account).await?;

        notify::dispatch(
            self.notifier.clone(),
            account.email.clone(),
            "Registration OTP".to_string(),
            format!("Your OTP for registration is: {otp}"),
        );

        info!(username = %account.username, "user registered");
        Ok(account)
    }

    /// Confirm a registration OTP, unlocking login.
    ///
    /// The code is single-use: it is cleared on success, so a replay
    /// fails `NotFound`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no account holds the code.
    pub async fn verify(&self, otp: &str) -> Result<Account, AccountError> {
        let mut account = self
            .store
            .find_by_otp(otp)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        account.verified = true;
        account.otp = String::new();
        self.store.save(&account).await?;

        info!(username = %account.username, "user verified");
        Ok(account)
    }

    /// Authenticate and issue a bearer token.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown username, `InvalidCredential` on a
    /// password mismatch, `Banned` and `NotVerified` for the respective
    /// account states, in that order.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AccountError> {
        let mut account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        if !verify_password(password, &account.password_hash) {
            return Err(AccountError::InvalidCredential);
        }

        if account.is_banned {
            return Err(AccountError::Banned);
        }

        if !account.verified {
            return Err(AccountError::NotVerified);
        }

        let token = self.signer.sign(&account)?;
        account.auth_token = token.clone();
        self.store.save(&account).await?;

        info!(username = %account.username, "user logged in");
        Ok(token)
    }

    /// Rotate the OTP for a password reset and mail it.
    ///
    /// # Errors
    ///
    /// `NotFound` when neither username nor email matches.
    pub async fn forgot_password(&self, identifier: &str) -> Result<Account, AccountError> {
        let mut account = self
            .store
            .find_by_username_or_email(identifier)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        let otp = generate_otp();
        account.otp = otp.clone();
        account.reset_state = ResetState::OtpIssued;
        self.store.save(&account).await?;

        notify::dispatch(
            self.notifier.clone(),
            account.email.clone(),
            "Password Reset OTP".to_string(),
            format!("Your OTP for password reset is: {otp}"),
        );

        info!(username = %account.username, "password reset OTP issued");
        Ok(account)
    }

    /// Confirm a password-reset OTP, allowing `reset_password` to apply
    /// a new password. The code is cleared on success.
    ///
    /// # Errors
    ///
    /// `NotFound` when no account holds the code.
    pub async fn verify_forgot_password(&self, otp: &str) -> Result<Account, AccountError> {
        let mut account = self
            .store
            .find_by_otp(otp)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        account.reset_state = ResetState::Confirmed;
        account.otp = String::new();
        self.store.save(&account).await?;

        info!(username = %account.username, "password reset confirmed");
        Ok(account)
    }

    /// Apply a new password after a confirmed reset.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown username, `InvalidOtpState` unless the
    /// reset OTP was confirmed, `InvalidCredential` when the existing
    /// password does not match.
    pub async fn reset_password(
        &self,
        username: &str,
        existing_password: &str,
        new_password: &str,
    ) -> Result<Account, AccountError> {
        let mut account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        if account.reset_state != ResetState::Confirmed {
            return Err(AccountError::InvalidOtpState);
        }

        if !verify_password(existing_password, &account.password_hash) {
            return Err(AccountError::InvalidCredential);
        }

        account.password_hash = hash_password(new_password)?;
        account.reset_state = ResetState::None;
        self.store.save(&account).await?;

        info!(username = %account.username, "password reset");
        Ok(account)
    }

    /// Append a skill, deduplicating case-insensitively after trimming.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown or never-logged-in account, `Conflict`
    /// for a duplicate skill.
    pub async fn add_skill(
        &self,
        username: &str,
        skill: &str,
    ) -> Result<Vec<String>, AccountError> {
        let mut account = self.authenticated_account(username).await?;

        let trimmed = skill.trim();
        let key = skill_key(trimmed);
        if account
            .skills
            .iter()
            .any(|existing| skill_key(existing) == key)
        {
            return Err(AccountError::conflict("Skill already exists"));
        }

        account.skills.push(trimmed.to_string());
        self.store.save(&account).await?;

        debug!(username = %account.username, skill = %trimmed, "skill added");
        Ok(account.skills)
    }

    /// Remove a skill by exact string match.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown account, a never-logged-in account, or
    /// a skill that is not present.
    pub async fn delete_skill(
        &self,
        username: &str,
        skill: &str,
    ) -> Result<Vec<String>, AccountError> {
        let mut account = self.authenticated_account(username).await?;

        let Some(position) = account.skills.iter().position(|existing| existing == skill) else {
            return Err(AccountError::not_found("Skill not found"));
        };

        account.skills.remove(position);
        self.store.save(&account).await?;

        debug!(username = %account.username, skill = %skill, "skill deleted");
        Ok(account.skills)
    }

    /// Add or update an education entry, keyed by institution.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown or never-logged-in account.
    pub async fn upsert_education(
        &self,
        username: &str,
        entry: Education,
    ) -> Result<Vec<Education>, AccountError> {
        let mut account = self.authenticated_account(username).await?;

        match account
            .education
            .iter_mut()
            .find(|existing| existing.institution == entry.institution)
        {
            Some(slot) => *slot = entry,
            None => account.education.push(entry),
        }
        self.store.save(&account).await?;

        Ok(account.education)
    }

    /// Add or update a work-experience entry, keyed by id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown or never-logged-in account.
    pub async fn upsert_work_experience(
        &self,
        username: &str,
        entry: WorkExperience,
    ) -> Result<Vec<WorkExperience>, AccountError> {
        let mut account = self.authenticated_account(username).await?;

        match account
            .work_experiences
            .iter_mut()
            .find(|existing| existing.id == entry.id)
        {
            Some(slot) => *slot = entry,
            None => account.work_experiences.push(entry),
        }
        self.store.save(&account).await?;

        Ok(account.work_experiences)
    }

    /// The global predefined-skills catalog.
    ///
    /// # Errors
    ///
    /// Fails only on storage errors.
    pub async fn predefined_skills(&self) -> Result<Vec<String>, AccountError> {
        Ok(self.store.predefined_skills().await?)
    }

    /// Remove skills from the catalog and from every account holding
    /// them. Admin only.
    ///
    /// # Errors
    ///
    /// `NotFound` unless the bearer token resolves to an admin account.
    pub async fn retire_skills(
        &self,
        token: &str,
        invalid_skills: &[String],
    ) -> Result<Vec<String>, AccountError> {
        let admin = self.require_admin(token).await?;

        let catalog: Vec<String> = self
            .store
            .predefined_skills()
            .await?
            .into_iter()
            .filter(|skill| !invalid_skills.contains(skill))
            .collect();
        self.store.save_predefined_skills(&catalog).await?;

        let holders = self.store.find_by_any_skill(invalid_skills).await?;
        for mut holder in holders {
            holder
                .skills
                .retain(|skill| !invalid_skills.contains(skill));
            self.store.save(&holder).await?;
        }

        info!(
            admin = %admin.username,
            retired = invalid_skills.len(),
            "skills retired from catalog"
        );
        Ok(catalog)
    }

    /// Merge proposed skills into the catalog, trimmed and
    /// case-insensitively deduplicated. Admin only.
    ///
    /// # Errors
    ///
    /// `NotFound` unless the bearer token resolves to an admin account.
    pub async fn adopt_skills(
        &self,
        token: &str,
        new_skills: &[String],
    ) -> Result<Vec<String>, AccountError> {
        let admin = self.require_admin(token).await?;

        let mut catalog = self.store.predefined_skills().await?;
        for skill in new_skills {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = skill_key(trimmed);
            if !catalog.iter().any(|existing| skill_key(existing) == key) {
                catalog.push(trimmed.to_string());
            }
        }
        self.store.save_predefined_skills(&catalog).await?;

        info!(admin = %admin.username, "skills adopted into catalog");
        Ok(catalog)
    }

    /// Verify a presented bearer token.
    ///
    /// # Errors
    ///
    /// `NotFound` for malformed, tampered, or expired tokens; the
    /// failure is indistinguishable from an unknown account on purpose.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AccountError> {
        self.signer
            .verify(token)
            .map_err(|_| AccountError::not_found("Invalid user"))
    }

    /// Resolve a bearer token to an admin account, or `NotFound`.
    ///
    /// Unauthorized callers get the same answer as nonexistent
    /// resources so the endpoint cannot be used for probing.
    async fn require_admin(&self, token: &str) -> Result<Account, AccountError> {
        let claims = self.verify_token(token)?;
        let account = self.authenticated_account(&claims.username).await?;
        if account.role != Role::Admin {
            return Err(AccountError::not_found("Only admin can make changes"));
        }
        Ok(account)
    }

    /// Load an account that has a live session token, else `NotFound`.
    async fn authenticated_account(&self, username: &str) -> Result<Account, AccountError> {
        let account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::not_found("User not found"))?;

        if !account.is_authenticated() {
            return Err(AccountError::not_found("Invalid user"));
        }

        Ok(account)
    }
}

/// Basic email shape check applied before persisting anything.
pub(crate) fn valid_email(email: &str) -> bool {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

/// Comparison key for case-insensitive skill deduplication.
fn skill_key(skill: &str) -> String {
    skill.trim().to_lowercase()
}
