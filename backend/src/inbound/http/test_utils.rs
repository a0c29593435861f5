//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};

use crate::Trace;
use crate::domain::ports::{MockGiftExchangeCommand, MockUserDirectoryQuery};
use crate::domain::{EmailAddress, Error, NewUser, User, UserId};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;

/// Build handler state from mocked driving ports.
pub fn mock_state(command: MockGiftExchangeCommand, query: MockUserDirectoryQuery) -> HttpState {
    HttpState::new(Arc::new(command), Arc::new(query))
}

/// The full API scope wrapped in the trace middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}

/// A user document with no gift exchanges.
pub fn sample_user(email: &str) -> User {
    let email = EmailAddress::new(email).expect("valid sample email");
    User::from_new(UserId::random(), NewUser { email })
}

/// Decode an error payload from a response.
pub async fn error_body(response: ServiceResponse) -> Error {
    actix_test::read_body_json(response).await
}
