//! `UserRepository` held in process memory.
//!
//! Backs local runs without `ACCOUNTS_DATABASE_URL` and the HTTP integration
//! tests. Accounts vanish when the process exits. The map is keyed by contact
//! handle and guarded by a single mutex, so the duplicate check and the insert
//! happen atomically.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ContactHandle, User};

/// Volatile user store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<ContactHandle, User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ContactHandle, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store is poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        match users.entry(user.contact_handle().clone()) {
            Entry::Occupied(_) => Err(UserPersistenceError::conflict(
                user.contact_handle().as_ref(),
            )),
            Entry::Vacant(slot) => Ok(slot.insert(user.clone()).clone()),
        }
    }

    async fn find_by_contact_handle(
        &self,
        contact_handle: &ContactHandle,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(contact_handle).cloned())
    }
}
