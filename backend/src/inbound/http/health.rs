//! Liveness and readiness probes for orchestrators.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe flags shared between the server bootstrap and the probe handlers.
///
/// The service starts live but not ready; `main` flips readiness once the
/// document store is reachable and clears liveness while draining.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Stop accepting traffic and report the process as draining.
    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 once the store handle is initialised, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe: 200 while running, 503 once shutdown has begun.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = actix_test::init_service(
            App::new().app_data(state).service(ready).service(live),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (response.status(), cache)
    }

    #[rstest]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case("/health/live", StatusCode::OK)]
    #[actix_web::test]
    async fn fresh_state_is_live_but_not_ready(#[case] uri: &str, #[case] expected: StatusCode) {
        let (status, cache) = probe(web::Data::new(HealthState::new()), uri).await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[actix_web::test]
    async fn ready_after_marking() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        let (status, _) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn draining_fails_both_probes(#[case] uri: &str) {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        state.mark_draining();
        let (status, _) = probe(state, uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
