//! One-time code generation for registration and password reset.

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

/// Codes are long enough to be emailed as opaque strings and looked up
/// verbatim; collisions across live accounts are not a practical concern.
pub const OTP_LENGTH: usize = 25;

/// Generate a fresh one-time code, uniform over `[A-Za-z0-9]`.
///
/// Raw codes are mailed to the user and stored on the account until
/// consumed.
#[must_use]
pub fn generate_otp() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(OTP_LENGTH)
        .map(char::from)
        .collect()
}
