//! Credential store port: durable user records keyed by contact handle.
use async_trait::async_trait;

use crate::domain::{ContactHandle, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The contact handle is already taken by another record.
        Conflict { contact_handle: String } =>
            "a user with contact handle {contact_handle} already exists",
    }
}

/// Persistence port for user records.
///
/// Records are insert-only: there is no update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Durably insert a new record and return it as stored.
    ///
    /// Fails with [`UserPersistenceError::Conflict`] when the contact handle
    /// already exists.
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Look up a record by contact handle. Absence is `Ok(None)`.
    async fn find_by_contact_handle(
        &self,
        contact_handle: &ContactHandle,
    ) -> Result<Option<User>, UserPersistenceError>;
}
