//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on the
//! [`AccountService`] port, so they can be tested with a mock.

use std::sync::Arc;

use crate::domain::ports::AccountService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
}

impl HttpState {
    /// Construct state from the account use-cases.
    pub fn new(accounts: Arc<dyn AccountService>) -> Self {
        Self { accounts }
    }
}
