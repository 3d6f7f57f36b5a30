//! Account domain service: registration and login.
//!
//! This implements the [`AccountService`] driving port on top of the
//! [`UserRepository`] and [`SecretHasher`] driven ports. Both use-cases are a
//! single store round-trip; the store's unique index is the only
//! coordination between concurrent registrations.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{Span, debug, info, warn};

use crate::domain::ports::{
    AccountError, AccountService, SecretHashError, SecretHasher, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    LoginCredentials, PlaintextSecret, Registration, SecretHash, TraceId, User, UserId,
};

const DECOY_SECRET: &str = "decoy secret for unknown contact handles";

type Decoy = Arc<OnceLock<Option<SecretHash>>>;

/// Account service implementing the driving port.
///
/// Secret hashing is CPU- and memory-bound, so every hasher call runs on
/// Tokio's blocking pool with the caller's [`TraceId`] and span re-entered.
#[derive(Clone)]
pub struct AccountServiceImpl {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn SecretHasher>,
    decoy: Decoy,
}

impl AccountServiceImpl {
    /// Create a new service from its driven ports.
    ///
    /// The decoy hash used for unknown contact handles is computed on first
    /// use; call [`Self::with_primed_decoy`] at startup to pay for it up front.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self {
            users,
            hasher,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    /// Compute the decoy hash now so the first unknown-handle login costs a
    /// single verification.
    ///
    /// This hashes on the calling thread. Call it during startup, not from a
    /// request handler.
    #[must_use]
    pub fn with_primed_decoy(self) -> Self {
        resolve_decoy(&self.decoy, self.hasher.as_ref());
        self
    }

    fn map_persistence_error(error: UserPersistenceError) -> AccountError {
        match error {
            UserPersistenceError::Conflict { .. } => AccountError::DuplicateAccount,
            UserPersistenceError::Connection { message } => {
                AccountError::unexpected(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                AccountError::unexpected(format!("user repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: SecretHashError) -> AccountError {
        AccountError::unexpected(error.to_string())
    }

    /// Run `op` against the hasher on the blocking pool.
    async fn run_hasher<T, F>(&self, op: F) -> Result<T, AccountError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SecretHasher) -> T + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let trace_id = TraceId::current();
        let span = Span::current();
        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            match trace_id {
                Some(id) => TraceId::sync_scope(id, || op(hasher.as_ref())),
                None => op(hasher.as_ref()),
            }
        })
        .await
        .map_err(|err| AccountError::unexpected(format!("secret hashing task failed: {err}")))
    }

    /// Spend one verification on a hash produced with the live parameters so
    /// an unknown handle costs about as much as a wrong secret.
    async fn burn_decoy_verification(&self, secret: &PlaintextSecret) {
        let decoy = Arc::clone(&self.decoy);
        let secret = secret.clone();
        let outcome = self
            .run_hasher(move |hasher| {
                let Some(hash) = resolve_decoy(&decoy, hasher) else {
                    return Ok(false);
                };
                hasher.verify(&secret, hash)
            })
            .await;
        if let Err(err) = outcome.and_then(|verified| verified.map_err(Self::map_hash_error)) {
            warn!(error = %err, "decoy verification failed");
        }
    }
}

fn resolve_decoy<'a>(
    decoy: &'a OnceLock<Option<SecretHash>>,
    hasher: &dyn SecretHasher,
) -> Option<&'a SecretHash> {
    decoy
        .get_or_init(|| {
            hasher
                .hash(&PlaintextSecret::new(DECOY_SECRET))
                .inspect_err(|err| warn!(error = %err, "decoy hash unavailable"))
                .ok()
        })
        .as_ref()
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn register(&self, registration: &Registration) -> Result<User, AccountError> {
        let secret = registration.secret().clone();
        let secret_hash = self
            .run_hasher(move |hasher| hasher.hash(&secret))
            .await?
            .map_err(Self::map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.contact_handle().clone(),
            registration.display_name().clone(),
            secret_hash,
        );

        let stored = self.users.save(&user).await.map_err(|err| {
            debug!(
                error = %err,
                contact_handle = %registration.contact_handle(),
                "registration rejected by store"
            );
            Self::map_persistence_error(err)
        })?;
        info!(user_id = %stored.id(), "account registered");
        Ok(stored)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, AccountError> {
        let found = self
            .users
            .find_by_contact_handle(credentials.contact_handle())
            .await
            .map_err(Self::map_persistence_error)?;

        let Some(user) = found else {
            self.burn_decoy_verification(credentials.secret()).await;
            debug!(
                contact_handle = %credentials.contact_handle(),
                "login for unknown contact handle"
            );
            return Err(AccountError::NotFound);
        };

        let secret = credentials.secret().clone();
        let stored_hash = user.secret_hash().clone();
        let verified = self
            .run_hasher(move |hasher| hasher.verify(&secret, &stored_hash))
            .await?
            .map_err(Self::map_hash_error)?;
        if !verified {
            info!(user_id = %user.id(), "login rejected: secret mismatch");
            return Err(AccountError::InvalidCredential);
        }

        info!(user_id = %user.id(), "login succeeded");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
