//! Wiring of driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use accounts::domain::AccountServiceImpl;
use accounts::domain::ports::UserRepository;
use accounts::inbound::http::state::HttpState;
use accounts::outbound::hashing::Argon2SecretHasher;
use accounts::outbound::memory::InMemoryUserRepository;
use accounts::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            warn!("no database configured; accounts are kept in memory and lost on exit");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

/// Build the shared handler state from the server configuration.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the configured Argon2 cost is rejected.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Argon2SecretHasher::new(config.argon2_cost).map_err(std::io::Error::other)?;
    let accounts = AccountServiceImpl::new(build_user_repository(config), Arc::new(hasher))
        .with_primed_decoy();
    Ok(web::Data::new(HttpState::new(Arc::new(accounts))))
}
