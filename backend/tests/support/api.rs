//! Shared HTTP helpers driving the API against the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use gift_exchange_backend::Trace;
use gift_exchange_backend::domain::{GiftExchangeService, TRACE_ID_HEADER};
use gift_exchange_backend::inbound::http::api_scope;
use gift_exchange_backend::inbound::http::state::HttpState;
use gift_exchange_backend::outbound::memory::InMemoryUserDocumentStore;

/// Captured status, trace header and JSON body (`Null` when empty).
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

/// Initialise the API over a fresh in-memory store.
pub(crate) async fn spawn_api()
-> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryUserDocumentStore::new());
    let service = Arc::new(GiftExchangeService::new(store));
    let state = HttpState::new(service.clone(), service);
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

pub(crate) async fn send<S>(app: &S, method: Method, path: &str, payload: Option<Value>) -> Reply
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::default().method(method).uri(path);
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// Identifiers of one participant's chain.
#[derive(Clone, Debug)]
pub(crate) struct Chain {
    pub(crate) user_id: String,
    pub(crate) gift_exchange_id: String,
    pub(crate) drawing_id: String,
}

impl Chain {
    pub(crate) fn exchange(&self) -> Value {
        json!({ "userId": self.user_id, "giftExchangeId": self.gift_exchange_id })
    }

    pub(crate) fn drawing(&self) -> Value {
        json!({
            "userId": self.user_id,
            "giftExchangeId": self.gift_exchange_id,
            "drawingId": self.drawing_id,
        })
    }

    pub(crate) fn participant(&self, participant_id: &str, extra: Value) -> Value {
        let mut body = self.drawing();
        if let (Some(target), Value::Object(extra)) = (body.as_object_mut(), extra) {
            target.insert("participantId".to_owned(), json!(participant_id));
            target.extend(extra);
        }
        body
    }
}

pub(crate) fn id_of(value: &Value) -> String {
    value["_id"].as_str().expect("document has an _id").to_owned()
}

/// Create `email`, an exchange and a drawing for `year`.
pub(crate) async fn seed_drawing<S>(app: &S, email: &str, exchange: &str, year: i64) -> Chain
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let user = send(app, Method::POST, "/api/v1/user", Some(json!({ "email": email }))).await;
    assert_eq!(user.status, StatusCode::CREATED);
    let user_id = id_of(&user.body);

    let with_exchange = send(
        app,
        Method::POST,
        "/api/v1/gift-exchange",
        Some(json!({ "userId": user_id, "name": exchange })),
    )
    .await;
    assert_eq!(with_exchange.status, StatusCode::CREATED);
    let gift_exchange_id = id_of(&with_exchange.body["giftExchanges"][0]);

    let with_drawing = send(
        app,
        Method::POST,
        "/api/v1/drawing",
        Some(json!({ "userId": user_id, "giftExchangeId": gift_exchange_id, "drawingYear": year })),
    )
    .await;
    assert_eq!(with_drawing.status, StatusCode::CREATED);
    let drawing_id = id_of(&with_drawing.body["giftExchanges"][0]["draws"][0]);

    Chain {
        user_id,
        gift_exchange_id,
        drawing_id,
    }
}

/// Add a participant and return its id.
pub(crate) async fn add_participant<S>(app: &S, chain: &Chain, name: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut body = chain.drawing();
    body["newParticipant"] = json!({ "name": name });
    let reply = send(app, Method::POST, "/api/v1/participant", Some(body)).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    participants(&reply.body)
        .iter()
        .find(|p| p["name"] == json!(name))
        .map(id_of)
        .expect("participant present after add")
}

/// Participants of the first drawing of the first exchange.
pub(crate) fn participants(user: &Value) -> Vec<Value> {
    user["giftExchanges"][0]["draws"][0]["participants"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

pub(crate) async fn fetch_user<S>(app: &S, email: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(app, Method::GET, &format!("/api/v1/user/{email}"), None).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.body
}
