//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `ACCOUNTS_*` environment variables and an
//! optional config file. The pool size carries an ortho_config default so the
//! merged layers are never empty; the remaining fields are optional and their
//! accessors supply defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::hashing::Argon2Cost;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the accounts service.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AccountsSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string; absent selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Seconds a request may wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Argon2 memory cost in KiB.
    pub argon2_memory_kib: Option<u32>,
    /// Argon2 passes over memory.
    pub argon2_iterations: Option<u32>,
    /// Argon2 lanes.
    pub argon2_parallelism: Option<u32>,
}

impl AccountsSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections)
                .with_connection_timeout(Duration::from_secs(
                    self.db_connect_timeout_secs
                        .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
                )),
        )
    }

    /// Argon2 cost, falling back to the baseline per field.
    pub fn argon2_cost(&self) -> Argon2Cost {
        let baseline = Argon2Cost::default();
        Argon2Cost {
            memory_kib: self.argon2_memory_kib.unwrap_or(baseline.memory_kib),
            iterations: self.argon2_iterations.unwrap_or(baseline.iterations),
            parallelism: self.argon2_parallelism.unwrap_or(baseline.parallelism),
        }
    }
}

impl std::fmt::Debug for AccountsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountsSettings")
            .field("bind_addr", &self.bind_addr)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .field("argon2_memory_kib", &self.argon2_memory_kib)
            .field("argon2_iterations", &self.argon2_iterations)
            .field("argon2_parallelism", &self.argon2_parallelism)
            .finish()
    }
}
