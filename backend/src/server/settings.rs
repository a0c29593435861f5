//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GIFT_EXCHANGE_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use gift_exchange_backend::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Configuration values controlling the HTTP listener and document store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GIFT_EXCHANGE")]
pub struct ServerSettings {
    /// Interface address to bind.
    #[ortho_config(default = default_host())]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL connection URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = DEFAULT_POOL_CONNECTION_TIMEOUT_SECS)]
    pub pool_connection_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}

impl ServerSettings {
    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.trim().parse()?;
        Ok(SocketAddr::new(host, self.port))
    }

    /// Pool configuration, present only when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size)
                .with_connection_timeout(Duration::from_secs(self.pool_connection_timeout_secs)),
        )
    }
}
