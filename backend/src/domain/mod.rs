//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define the nested user document (user → gift exchange → drawing
//! → participant → restrictions), the invariants that hold across it, and the
//! service that mutates it through the [`ports::UserDocumentStore`] port.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - GiftExchangeError: tagged failure returned by every operation.
//! - User, GiftExchange, Draw, Participant: the document tree.
//! - GiftExchangeService: implementation of the driving ports.

pub mod email;
pub mod error;
pub mod gift_exchange;
pub mod gift_exchange_error;
mod gift_exchange_service;
pub mod ids;
pub mod participant;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::gift_exchange::{Draw, GiftExchange};
pub use self::gift_exchange_error::{ConflictReason, EntityKind, GiftExchangeError, RequestField};
pub use self::gift_exchange_service::GiftExchangeService;
pub use self::ids::{DrawId, EntityIdError, GiftExchangeId, ParticipantId, UserId};
pub use self::participant::{Participant, ParticipantPatch, Restrictions};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gift_exchange_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such drawing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
