//! HTTP server configuration object and store selection.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use gift_exchange_backend::outbound::memory::InMemoryUserDocumentStore;
use gift_exchange_backend::outbound::persistence::{
    DbPool, DieselUserDocumentStore, PoolConfig, run_pending_migrations,
};

/// Process-scoped handle to the document store.
///
/// Acquired once at startup and dropped after the server stops.
#[derive(Clone)]
pub enum DocumentStore {
    InMemory(Arc<InMemoryUserDocumentStore>),
    Postgres {
        store: Arc<DieselUserDocumentStore>,
        pool: DbPool,
    },
}

impl DocumentStore {
    /// Open the configured store, applying migrations first for PostgreSQL.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when migrations or pool construction fail.
    pub async fn connect(pool_config: Option<PoolConfig>) -> std::io::Result<Self> {
        let Some(config) = pool_config else {
            warn!("no database URL configured; documents are kept in memory only");
            return Ok(Self::InMemory(Arc::new(InMemoryUserDocumentStore::new())));
        };

        let applied = run_pending_migrations(config.database_url())
            .await
            .map_err(|err| std::io::Error::other(format!("database migrations failed: {err}")))?;
        info!(applied, "database migrations complete");

        let pool = DbPool::new(config)
            .await
            .map_err(|err| std::io::Error::other(format!("database pool setup failed: {err}")))?;
        Ok(Self::Postgres {
            store: Arc::new(DieselUserDocumentStore::new(pool.clone())),
            pool,
        })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }

    /// Release the store, logging what is being closed.
    pub fn close(self) {
        match self {
            Self::InMemory(_) => info!(store = "memory", "document store released"),
            Self::Postgres { pool, .. } => info!(
                store = "postgres",
                open_connections = pool.open_connections(),
                "document store released"
            ),
        }
    }
}

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: DocumentStore,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: DocumentStore) -> Self {
        Self { bind_addr, store }
    }
}
