//! Tests for user handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{
    CreateUserRequest, DeleteUserRequest, MockGiftExchangeCommand, MockUserDirectoryQuery,
};
use crate::domain::{
    ConflictReason, EntityKind, ErrorCode, GiftExchangeError, RequestField, TRACE_ID_HEADER,
};
use crate::inbound::http::test_utils::{error_body, mock_state, sample_user, test_app};

#[rstest]
#[case(true)]
#[case(false)]
#[actix_web::test]
async fn exists_reports_the_directory_answer(#[case] exists: bool) {
    let mut query = MockUserDirectoryQuery::new();
    query
        .expect_user_exists()
        .with(eq("a@example.com"))
        .times(1)
        .return_once(move |_| Ok(exists));
    let app =
        actix_test::init_service(test_app(mock_state(MockGiftExchangeCommand::new(), query)))
            .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/user/exists/a@example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!(exists));
}

#[actix_web::test]
async fn get_user_returns_the_document() {
    let user = sample_user("a@example.com");
    let expected_id = user.id.to_string();
    let mut query = MockUserDirectoryQuery::new();
    query
        .expect_find_user_by_email()
        .return_once(move |_| Ok(user));
    let app =
        actix_test::init_service(test_app(mock_state(MockGiftExchangeCommand::new(), query)))
            .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/user/a@example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["_id"], json!(expected_id));
    assert_eq!(body["email"], json!("a@example.com"));
    assert_eq!(body["giftExchanges"], json!([]));
    assert!(body.get("revision").is_none());
}

#[actix_web::test]
async fn unknown_user_is_404_with_trace_header() {
    let mut query = MockUserDirectoryQuery::new();
    query
        .expect_find_user_by_email()
        .return_once(|email| Err(GiftExchangeError::not_found(EntityKind::User, email)));
    let app =
        actix_test::init_service(test_app(mock_state(MockGiftExchangeCommand::new(), query)))
            .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/user/nobody@example.com")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let error = error_body(response).await;
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.trace_id().map(str::to_owned), header);
    assert_eq!(
        error.details(),
        Some(&json!({"entity": "user", "id": "nobody@example.com"}))
    );
}

#[actix_web::test]
async fn create_user_returns_201_with_the_document() {
    let mut command = MockGiftExchangeCommand::new();
    command
        .expect_create_user()
        .with(eq(CreateUserRequest {
            email: Some("a@example.com".to_owned()),
        }))
        .return_once(|_| Ok(sample_user("a@example.com")));
    let app =
        actix_test::init_service(test_app(mock_state(command, MockUserDirectoryQuery::new())))
            .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/user")
        .set_json(json!({"email": "a@example.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["email"], json!("a@example.com"));
}

#[rstest]
#[case(
    GiftExchangeError::missing_field(RequestField::Email),
    StatusCode::BAD_REQUEST,
    json!({"field": "email", "code": "missing_field"})
)]
#[case(
    GiftExchangeError::conflict(EntityKind::User, ConflictReason::EmailTaken),
    StatusCode::CONFLICT,
    json!({"entity": "user", "code": "email_taken"})
)]
#[actix_web::test]
async fn create_user_failures_map_to_statuses(
    #[case] failure: GiftExchangeError,
    #[case] status: StatusCode,
    #[case] details: Value,
) {
    let mut command = MockGiftExchangeCommand::new();
    command
        .expect_create_user()
        .return_once(move |_| Err(failure));
    let app =
        actix_test::init_service(test_app(mock_state(command, MockUserDirectoryQuery::new())))
            .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/user")
        .set_json(json!({}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    assert_eq!(error_body(response).await.details(), Some(&details));
}

#[rstest]
#[case(json!({"userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}))]
#[case(json!({"_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}))]
#[actix_web::test]
async fn delete_user_is_204_when_removed(#[case] body: Value) {
    let mut command = MockGiftExchangeCommand::new();
    command
        .expect_delete_user()
        .with(eq(DeleteUserRequest {
            user_id: Some("3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned()),
        }))
        .return_once(|_| Ok(1));
    let app =
        actix_test::init_service(test_app(mock_state(command, MockUserDirectoryQuery::new())))
            .await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/user")
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn delete_user_is_404_when_nothing_was_removed() {
    let mut command = MockGiftExchangeCommand::new();
    command.expect_delete_user().return_once(|_| Ok(0));
    let app =
        actix_test::init_service(test_app(mock_state(command, MockUserDirectoryQuery::new())))
            .await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/user")
        .set_json(json!({"userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = error_body(response).await;
    assert_eq!(
        error.details(),
        Some(&json!({"entity": "user", "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}))
    );
}
