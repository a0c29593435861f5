//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST path from the inbound layer together with
//! the schema wrappers from [`crate::inbound::http::schemas`], so domain
//! types never depend on utoipa. The document is served by Swagger UI in
//! debug builds and printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::dto::{
    AddDrawingBody, AddGiftExchangeBody, AddParticipantBody, CreateUserBody, DeleteUserBody,
    DrawingTarget, ExchangeTarget, NewParticipantBody, ParticipantTarget, ParticipantUpdatesBody,
    RenameGiftExchangeBody, RestrictionBody, UpdateParticipantBody,
};
use crate::inbound::http::schemas::{
    DrawSchema, ErrorCodeSchema, ErrorSchema, GiftExchangeSchema, ParticipantSchema,
    UpdateCountsSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gift exchange backend API",
        description = "Users, their gift exchanges, yearly drawings, participants and restrictions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::user_exists,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::gift_exchanges::add_gift_exchange,
        crate::inbound::http::gift_exchanges::rename_gift_exchange,
        crate::inbound::http::gift_exchanges::delete_gift_exchange,
        crate::inbound::http::gift_exchanges::add_drawing,
        crate::inbound::http::gift_exchanges::delete_drawing,
        crate::inbound::http::participants::add_participant,
        crate::inbound::http::participants::update_participant,
        crate::inbound::http::participants::delete_participant,
        crate::inbound::http::participants::add_restriction,
        crate::inbound::http::participants::delete_restriction,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        GiftExchangeSchema,
        DrawSchema,
        ParticipantSchema,
        UpdateCountsSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserBody,
        DeleteUserBody,
        AddGiftExchangeBody,
        ExchangeTarget,
        RenameGiftExchangeBody,
        AddDrawingBody,
        DrawingTarget,
        NewParticipantBody,
        AddParticipantBody,
        ParticipantTarget,
        ParticipantUpdatesBody,
        UpdateParticipantBody,
        RestrictionBody,
    )),
    tags(
        (name = "users", description = "User documents"),
        (name = "gift exchanges", description = "Named exchanges owned by a user"),
        (name = "drawings", description = "Yearly drawings of an exchange"),
        (name = "participants", description = "People taking part in a drawing"),
        (name = "restrictions", description = "Names a participant must not draw"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
