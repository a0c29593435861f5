//! Backend entry-point: loads settings, opens the document store and serves
//! the REST API until shutdown.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gift_exchange_backend::inbound::http::health::HealthState;
use server::{DocumentStore, ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let store = DocumentStore::connect(settings.pool_config()).await?;
    let config = ServerConfig::new(bind_addr, store);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    let outcome = server.await;

    health_state.mark_draining();
    let ServerConfig { store, .. } = config;
    store.close();
    info!("server stopped");
    outcome
}
