//! Domain failures raised by the account service.

use thiserror::Error;

/// Everything the account state machine can refuse to do.
///
/// Handlers map these to HTTP statuses; `Store` wraps unexpected
/// persistence failures and must never leak its message to callers.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid password")]
    InvalidCredential,
    #[error("User not verified")]
    NotVerified,
    #[error("User is banned")]
    Banned,
    #[error("Invalid or expired OTP")]
    InvalidOtpState,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AccountError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = AccountError::validation("Password and confirm password do not match");
        assert_eq!(
            err.to_string(),
            "Password and confirm password do not match"
        );
        assert_eq!(AccountError::Banned.to_string(), "User is banned");
        assert_eq!(
            AccountError::InvalidOtpState.to_string(),
            "Invalid or expired OTP"
        );
    }

    #[test]
    fn store_errors_wrap_anyhow() {
        let err: AccountError = anyhow::anyhow!("connection refused").into();
        assert!(matches!(err, AccountError::Store(_)));
    }
}
