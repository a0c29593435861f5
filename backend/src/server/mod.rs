//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::{DocumentStore, ServerConfig};
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use gift_exchange_backend::Trace;
#[cfg(debug_assertions)]
use gift_exchange_backend::doc::ApiDoc;
use gift_exchange_backend::inbound::http::api_scope;
use gift_exchange_backend::inbound::http::health::{HealthState, live, ready};
use gift_exchange_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the configured document store.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config.store));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, store = config.store.kind(), "server listening");
    health_state.mark_ready();
    Ok(server)
}
