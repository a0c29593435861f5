//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("connection pool poisoned")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn conflict_case(expected_trace_id: String) -> Error {
    Error::conflict("gift exchange name is already in use")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"entity": "giftExchange", "code": "name_taken"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_the_trace_id(
    #[from(internal_error_case)] internal_error: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_pass_through_with_details(
    #[from(conflict_case)] conflict: Error,
    expected_trace_id: String,
) {
    let payload =
        assert_error_response(conflict, StatusCode::CONFLICT, Some(expected_trace_id.as_str()))
            .await;
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.message(), "gift exchange name is already in use");
    assert_eq!(
        payload.details(),
        Some(&json!({"entity": "giftExchange", "code": "name_taken"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "name"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "name"})));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Body {}

#[rstest]
#[case("{not json", "application/json", "malformed_body")]
#[case("{\"name\": \"x\"}", "text/plain", "unsupported_content_type")]
#[actix_web::test]
async fn unreadable_bodies_become_invalid_request_payloads(
    #[case] body: &'static str,
    #[case] content_type: &'static str,
    #[case] expected_code: &str,
) {
    let app = actix_test::init_service(App::new().app_data(json_config()).route(
        "/",
        web::post().to(|_: web::Json<Body>| async { HttpResponse::Ok().finish() }),
    ))
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", content_type))
        .set_payload(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_test::read_body_json(response).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.details(), Some(&json!({"code": expected_code})));
}
