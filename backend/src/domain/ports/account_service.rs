//! Driving port for the registration and login use-cases.
//!
//! Inbound adapters call this port without knowing which store or hashing
//! primitive backs it, so HTTP handler tests can substitute a double.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{LoginCredentials, Registration, User};

/// Failure kinds of the account use-cases.
///
/// Adapters branch on the variant, never on the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// The contact handle is already registered.
    #[error("an account with this contact handle already exists")]
    DuplicateAccount,
    /// No account exists for the contact handle.
    #[error("no account is registered for this contact handle")]
    NotFound,
    /// The secret did not verify against the stored hash.
    #[error("the secret is incorrect")]
    InvalidCredential,
    /// Store or infrastructure failure.
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl AccountError {
    /// Helper for infrastructure failures.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Hash the secret and persist a new account.
    async fn register(&self, registration: &Registration) -> Result<User, AccountError>;

    /// Look up the account and verify the secret.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AccountError>;
}
