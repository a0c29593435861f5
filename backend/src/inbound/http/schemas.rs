//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their serialised shape and are registered with
//! utoipa under the domain type names.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required input is missing or a value is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An identifier does not resolve within its parent chain.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness rule would be broken or a concurrent write won.
    #[schema(rename = "conflict")]
    Conflict,
    /// The document store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "drawing 7d1f0c5e-8a0b-4a43-9d55-3f5bb3c0f1a2 was not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "6f1c3c54-6a3c-4c2b-9fd4-0f5d3c9d7f10")]
    trace_id: Option<String>,
    /// Offending field or entity, when known.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Participant`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Participant)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ParticipantSchema {
    #[schema(rename = "_id", example = "0b8e3c0e-2f4e-4a8e-8f57-6b0a3c2f9d11")]
    id: String,
    #[schema(example = "Alice")]
    name: String,
    #[schema(example = "alice@example.com")]
    email: Option<String>,
    /// Name of the participant this one gives a gift to; empty until drawn.
    #[schema(rename = "secretDraw", example = "Bob")]
    secret_draw: String,
    /// Names this participant must not be paired with.
    restrictions: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::Draw`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Draw)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DrawSchema {
    #[schema(rename = "_id")]
    id: String,
    #[schema(example = 2024)]
    year: i32,
    participants: Vec<ParticipantSchema>,
}

/// OpenAPI schema for [`crate::domain::GiftExchange`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GiftExchange)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GiftExchangeSchema {
    #[schema(rename = "_id")]
    id: String,
    #[schema(example = "Office 2024")]
    name: String,
    draws: Vec<DrawSchema>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// The whole nested document, as returned by creation endpoints.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(rename = "_id", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "a@example.com")]
    email: String,
    #[schema(rename = "giftExchanges")]
    gift_exchanges: Vec<GiftExchangeSchema>,
}

/// OpenAPI schema for [`crate::domain::ports::UpdateCounts`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UpdateCounts, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UpdateCountsSchema {
    /// 1 when the addressed element chain resolved.
    #[schema(example = 1)]
    matched_count: u64,
    /// 1 when the write changed the document.
    #[schema(example = 1)]
    modified_count: u64,
}
