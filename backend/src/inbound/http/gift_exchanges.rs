//! Gift exchange and drawing endpoints.
//!
//! ```text
//! POST   /api/v1/gift-exchange {"userId":"…","name":"Office 2024"}
//! PATCH  /api/v1/gift-exchange {"userId":"…","giftExchangeId":"…","newName":"Office"}
//! DELETE /api/v1/gift-exchange {"userId":"…","giftExchangeId":"…"}
//! POST   /api/v1/drawing       {"userId":"…","giftExchangeId":"…","drawingYear":2024}
//! DELETE /api/v1/drawing       {"userId":"…","giftExchangeId":"…","drawingId":"…"}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};

use crate::domain::ports::UpdateCounts;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AddDrawingBody, AddGiftExchangeBody, DrawingTarget, ExchangeTarget, RenameGiftExchangeBody,
};
use crate::inbound::http::schemas::{ErrorSchema, UpdateCountsSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Create a named gift exchange for a user.
#[utoipa::path(
    post,
    path = "/api/v1/gift-exchange",
    request_body = AddGiftExchangeBody,
    responses(
        (status = 201, description = "Updated user document", body = UserSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Name already used by this user", body = ErrorSchema)
    ),
    tags = ["gift exchanges"],
    operation_id = "addGiftExchange"
)]
#[post("/gift-exchange")]
pub async fn add_gift_exchange(
    state: web::Data<HttpState>,
    payload: web::Json<AddGiftExchangeBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .gift_exchanges
        .add_gift_exchange(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Rename a gift exchange in place.
#[utoipa::path(
    patch,
    path = "/api/v1/gift-exchange",
    request_body = RenameGiftExchangeBody,
    responses(
        (status = 200, description = "Update counts", body = UpdateCountsSchema),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "No such user or gift exchange", body = ErrorSchema),
        (status = 409, description = "Name already used by this user", body = ErrorSchema)
    ),
    tags = ["gift exchanges"],
    operation_id = "renameGiftExchange"
)]
#[patch("/gift-exchange")]
pub async fn rename_gift_exchange(
    state: web::Data<HttpState>,
    payload: web::Json<RenameGiftExchangeBody>,
) -> ApiResult<web::Json<UpdateCounts>> {
    let counts = state
        .gift_exchanges
        .rename_gift_exchange(payload.into_inner().into())
        .await?;
    Ok(web::Json(counts))
}

#[utoipa::path(
    delete,
    path = "/api/v1/gift-exchange",
    request_body = ExchangeTarget,
    responses(
        (status = 204, description = "Gift exchange removed"),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "No such user or gift exchange", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["gift exchanges"],
    operation_id = "deleteGiftExchange"
)]
#[delete("/gift-exchange")]
pub async fn delete_gift_exchange(
    state: web::Data<HttpState>,
    payload: web::Json<ExchangeTarget>,
) -> ApiResult<HttpResponse> {
    state
        .gift_exchanges
        .delete_gift_exchange(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a yearly drawing. A year that already has a drawing is left as is.
#[utoipa::path(
    post,
    path = "/api/v1/drawing",
    request_body = AddDrawingBody,
    responses(
        (status = 201, description = "Updated user document", body = UserSchema),
        (status = 400, description = "Missing input or invalid year", body = ErrorSchema),
        (status = 404, description = "No such user or gift exchange", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["drawings"],
    operation_id = "addDrawing"
)]
#[post("/drawing")]
pub async fn add_drawing(
    state: web::Data<HttpState>,
    payload: web::Json<AddDrawingBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .gift_exchanges
        .add_drawing(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

#[utoipa::path(
    delete,
    path = "/api/v1/drawing",
    request_body = DrawingTarget,
    responses(
        (status = 204, description = "Drawing removed"),
        (status = 400, description = "Missing or malformed input", body = ErrorSchema),
        (status = 404, description = "No such user, gift exchange or drawing", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["drawings"],
    operation_id = "deleteDrawing"
)]
#[delete("/drawing")]
pub async fn delete_drawing(
    state: web::Data<HttpState>,
    payload: web::Json<DrawingTarget>,
) -> ApiResult<HttpResponse> {
    state
        .gift_exchanges
        .delete_drawing(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
