//! HTTP server configuration object.

use std::net::SocketAddr;

use accounts::outbound::hashing::Argon2Cost;
use accounts::outbound::persistence::DbPool;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) argon2_cost: Argon2Cost,
}

impl ServerConfig {
    /// Configuration with the in-memory store and default hashing cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            argon2_cost: Argon2Cost::default(),
        }
    }

    /// Persist accounts in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the Argon2 cost used for new hashes.
    #[must_use]
    pub fn with_argon2_cost(mut self, cost: Argon2Cost) -> Self {
        self.argon2_cost = cost;
        self
    }
}
