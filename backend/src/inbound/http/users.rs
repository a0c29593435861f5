//! User endpoints.
//!
//! ```text
//! GET    /api/v1/user/exists/{email}
//! GET    /api/v1/user/{email}
//! POST   /api/v1/user    {"email":"a@example.com"}
//! DELETE /api/v1/user    {"userId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::{Error, EntityKind, GiftExchangeError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CreateUserBody, DeleteUserBody};
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Report whether a user is registered under the email.
#[utoipa::path(
    get,
    path = "/api/v1/user/exists/{email}",
    params(("email" = String, Path, description = "Email address to look up")),
    responses(
        (status = 200, description = "Whether the user exists", body = bool),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userExists"
)]
#[get("/user/exists/{email}")]
pub async fn user_exists(
    state: web::Data<HttpState>,
    email: web::Path<String>,
) -> ApiResult<web::Json<bool>> {
    let exists = state.directory.user_exists(&email).await?;
    Ok(web::Json(exists))
}

/// Fetch the whole user document by email.
#[utoipa::path(
    get,
    path = "/api/v1/user/{email}",
    params(("email" = String, Path, description = "Email address of the user")),
    responses(
        (status = 200, description = "User document", body = UserSchema),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{email}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    email: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.directory.find_user_by_email(&email).await?;
    Ok(web::Json(user))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/user",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Missing or malformed email", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state
        .gift_exchanges
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Remove a user and everything nested under it.
#[utoipa::path(
    delete,
    path = "/api/v1/user",
    request_body = DeleteUserBody,
    responses(
        (status = 204, description = "User removed"),
        (status = 400, description = "Missing or malformed user id", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    payload: web::Json<DeleteUserBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let user_id = body.user_id.clone().unwrap_or_default();
    let removed = state.gift_exchanges.delete_user(body.into()).await?;
    if removed == 0 {
        return Err(Error::from(GiftExchangeError::not_found(
            EntityKind::User,
            user_id,
        )));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
