//! Participant and restriction endpoints.
//!
//! ```text
//! POST   /api/v1/participant {"userId":"…","giftExchangeId":"…","drawingId":"…","newParticipant":{"name":"Alice"}}
//! PATCH  /api/v1/participant {…,"participantId":"…","updates":{"secretDraw":""}}
//! DELETE /api/v1/participant {…,"participantId":"…"}
//! POST   /api/v1/restriction {…,"participantId":"…","restrictionName":"Bob"}
//! DELETE /api/v1/restriction {…,"participantId":"…","restrictionName":"Bob"}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};

use crate::domain::ports::UpdateCounts;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AddParticipantBody, ParticipantTarget, RestrictionBody, UpdateParticipantBody,
};
use crate::inbound::http::schemas::{ErrorSchema, UpdateCountsSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Add a participant to a drawing. A name already in the drawing is left as is.
#[utoipa::path(
    post,
    path = "/api/v1/participant",
    request_body = AddParticipantBody,
    responses(
        (status = 201, description = "Updated user document", body = UserSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "No such user, gift exchange or drawing", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["participants"],
    operation_id = "addParticipant"
)]
#[post("/participant")]
pub async fn add_participant(
    state: web::Data<HttpState>,
    payload: web::Json<AddParticipantBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .gift_exchanges
        .add_participant(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Change a participant's name, email or secret draw.
///
/// Only keys present in `updates` are applied.
#[utoipa::path(
    patch,
    path = "/api/v1/participant",
    request_body = UpdateParticipantBody,
    responses(
        (status = 200, description = "Update counts", body = UpdateCountsSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "Participant chain did not resolve", body = ErrorSchema),
        (status = 409, description = "Name already used in the drawing", body = ErrorSchema)
    ),
    tags = ["participants"],
    operation_id = "updateParticipant"
)]
#[patch("/participant")]
pub async fn update_participant(
    state: web::Data<HttpState>,
    payload: web::Json<UpdateParticipantBody>,
) -> ApiResult<web::Json<UpdateCounts>> {
    let counts = state
        .gift_exchanges
        .update_participant(payload.into_inner().into())
        .await?;
    Ok(web::Json(counts))
}

#[utoipa::path(
    delete,
    path = "/api/v1/participant",
    request_body = ParticipantTarget,
    responses(
        (status = 204, description = "Participant removed"),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "Participant chain did not resolve", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["participants"],
    operation_id = "deleteParticipant"
)]
#[delete("/participant")]
pub async fn delete_participant(
    state: web::Data<HttpState>,
    payload: web::Json<ParticipantTarget>,
) -> ApiResult<HttpResponse> {
    state
        .gift_exchanges
        .delete_participant(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Exclude a name from a participant's possible recipients.
#[utoipa::path(
    post,
    path = "/api/v1/restriction",
    request_body = RestrictionBody,
    responses(
        (status = 201, description = "Restriction added", body = UpdateCountsSchema),
        (status = 200, description = "Restriction was already present", body = UpdateCountsSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "Participant chain did not resolve", body = ErrorSchema)
    ),
    tags = ["restrictions"],
    operation_id = "addRestriction"
)]
#[post("/restriction")]
pub async fn add_restriction(
    state: web::Data<HttpState>,
    payload: web::Json<RestrictionBody>,
) -> ApiResult<HttpResponse> {
    let counts = state
        .gift_exchanges
        .add_restriction(payload.into_inner().into())
        .await?;
    let mut response = if counts.modified_count > 0 {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(counts))
}

#[utoipa::path(
    delete,
    path = "/api/v1/restriction",
    request_body = RestrictionBody,
    responses(
        (status = 200, description = "Update counts", body = UpdateCountsSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "Participant chain did not resolve", body = ErrorSchema)
    ),
    tags = ["restrictions"],
    operation_id = "deleteRestriction"
)]
#[delete("/restriction")]
pub async fn delete_restriction(
    state: web::Data<HttpState>,
    payload: web::Json<RestrictionBody>,
) -> ApiResult<web::Json<UpdateCounts>> {
    let counts = state
        .gift_exchanges
        .delete_restriction(payload.into_inner().into())
        .await?;
    Ok(web::Json(counts))
}
