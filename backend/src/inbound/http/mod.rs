//! HTTP inbound adapter exposing the gift exchange REST endpoints.

pub mod dto;
pub mod error;
pub mod gift_exchanges;
pub mod health;
pub mod participants;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Every `/api/v1` route, sharing one JSON extractor configuration.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use gift_exchange_backend::inbound::http::api_scope;
/// use gift_exchange_backend::inbound::http::state::HttpState;
///
/// fn app(state: HttpState) {
///     let _app = App::new().app_data(web::Data::new(state)).service(api_scope());
/// }
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(error::json_config())
        .service(users::user_exists)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::delete_user)
        .service(gift_exchanges::add_gift_exchange)
        .service(gift_exchanges::rename_gift_exchange)
        .service(gift_exchanges::delete_gift_exchange)
        .service(gift_exchanges::add_drawing)
        .service(gift_exchanges::delete_drawing)
        .service(participants::add_participant)
        .service(participants::update_participant)
        .service(participants::delete_participant)
        .service(participants::add_restriction)
        .service(participants::delete_restriction)
}
