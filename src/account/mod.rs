//! Account domain: records, credential state machine, and token issuance.

pub mod error;
pub mod model;
pub mod otp;
pub mod password;
pub mod service;
pub mod token;

pub use error::AccountError;
pub use model::{Account, Education, ResetState, Role, WorkExperience};
pub use service::{AccountService, RegisterRequest};
pub use token::{Claims, TokenSigner};
