//! Request bodies for the gift exchange endpoints.
//!
//! Every field is optional at the JSON level so the domain service, not the
//! extractor, decides which required input is reported missing first.
//! Identifiers keep the camelCase keys clients already send; the user id
//! also accepts the document key `_id`.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    AddDrawingRequest, AddGiftExchangeRequest, AddParticipantRequest, CreateUserRequest,
    DeleteUserRequest, DrawingLocator, ExchangeLocator, NewParticipantInput, ParticipantLocator,
    ParticipantUpdates, RenameGiftExchangeRequest, RestrictionRequest, UpdateParticipantRequest,
};

/// Keep "key present with null" apart from "key absent".
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Body of `POST /api/v1/user`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[schema(example = "a@example.com")]
    pub email: Option<String>,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self { email: body.email }
    }
}

/// Body of `DELETE /api/v1/user`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserBody {
    #[serde(alias = "_id")]
    pub user_id: Option<String>,
}

impl From<DeleteUserBody> for DeleteUserRequest {
    fn from(body: DeleteUserBody) -> Self {
        Self {
            user_id: body.user_id,
        }
    }
}

/// Body of `POST /api/v1/gift-exchange`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddGiftExchangeBody {
    #[serde(alias = "_id")]
    pub user_id: Option<String>,
    #[schema(example = "Office 2024")]
    pub name: Option<String>,
}

impl From<AddGiftExchangeBody> for AddGiftExchangeRequest {
    fn from(body: AddGiftExchangeBody) -> Self {
        Self {
            user_id: body.user_id,
            name: body.name,
        }
    }
}

/// Addresses one gift exchange; body of `DELETE /api/v1/gift-exchange`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeTarget {
    #[serde(alias = "_id")]
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
}

impl From<ExchangeTarget> for ExchangeLocator {
    fn from(target: ExchangeTarget) -> Self {
        Self {
            user_id: target.user_id,
            gift_exchange_id: target.gift_exchange_id,
        }
    }
}

/// Body of `PATCH /api/v1/gift-exchange`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameGiftExchangeBody {
    #[serde(flatten)]
    pub target: ExchangeTarget,
    #[schema(example = "Office 2025")]
    pub new_name: Option<String>,
}

impl From<RenameGiftExchangeBody> for RenameGiftExchangeRequest {
    fn from(body: RenameGiftExchangeBody) -> Self {
        Self {
            exchange: body.target.into(),
            new_name: body.new_name,
        }
    }
}

/// Body of `POST /api/v1/drawing`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDrawingBody {
    #[serde(flatten)]
    pub target: ExchangeTarget,
    #[serde(alias = "year")]
    #[schema(example = 2024)]
    pub drawing_year: Option<i64>,
}

impl From<AddDrawingBody> for AddDrawingRequest {
    fn from(body: AddDrawingBody) -> Self {
        Self {
            exchange: body.target.into(),
            year: body.drawing_year,
        }
    }
}

/// Addresses one drawing; body of `DELETE /api/v1/drawing`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawingTarget {
    #[serde(alias = "_id")]
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
    pub drawing_id: Option<String>,
}

impl From<DrawingTarget> for DrawingLocator {
    fn from(target: DrawingTarget) -> Self {
        Self {
            user_id: target.user_id,
            gift_exchange_id: target.gift_exchange_id,
            drawing_id: target.drawing_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipantBody {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    /// Optional; blank is treated as absent.
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
}

/// Body of `POST /api/v1/participant`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantBody {
    #[serde(flatten)]
    pub target: DrawingTarget,
    pub new_participant: Option<NewParticipantBody>,
}

impl From<AddParticipantBody> for AddParticipantRequest {
    fn from(body: AddParticipantBody) -> Self {
        Self {
            drawing: body.target.into(),
            participant: body.new_participant.map(|p| NewParticipantInput {
                name: p.name,
                email: p.email,
            }),
        }
    }
}

/// Addresses one participant; body of `DELETE /api/v1/participant`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantTarget {
    #[serde(alias = "_id")]
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
    pub drawing_id: Option<String>,
    pub participant_id: Option<String>,
}

impl From<ParticipantTarget> for ParticipantLocator {
    fn from(target: ParticipantTarget) -> Self {
        Self {
            user_id: target.user_id,
            gift_exchange_id: target.gift_exchange_id,
            drawing_id: target.drawing_id,
            participant_id: target.participant_id,
        }
    }
}

/// Fields to change on a participant.
///
/// A key that is present is applied even when its value is empty or `null`;
/// `"secretDraw": ""` clears the assignment.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantUpdatesBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub secret_draw: Option<Option<String>>,
}

impl From<ParticipantUpdatesBody> for ParticipantUpdates {
    fn from(body: ParticipantUpdatesBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            secret_draw: body.secret_draw,
        }
    }
}

/// Body of `PATCH /api/v1/participant`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantBody {
    #[serde(flatten)]
    pub target: ParticipantTarget,
    pub updates: Option<ParticipantUpdatesBody>,
}

impl From<UpdateParticipantBody> for UpdateParticipantRequest {
    fn from(body: UpdateParticipantBody) -> Self {
        Self {
            participant: body.target.into(),
            updates: body.updates.map(Into::into),
        }
    }
}

/// Body of `POST` and `DELETE /api/v1/restriction`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionBody {
    #[serde(flatten)]
    pub target: ParticipantTarget,
    #[schema(example = "Bob")]
    pub restriction_name: Option<String>,
}

impl From<RestrictionBody> for RestrictionRequest {
    fn from(body: RestrictionBody) -> Self {
        Self {
            participant: body.target.into(),
            restriction_name: body.restriction_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn updates(value: serde_json::Value) -> ParticipantUpdates {
        serde_json::from_value::<ParticipantUpdatesBody>(value)
            .expect("updates body")
            .into()
    }

    #[rstest]
    fn absent_keys_are_not_updates() {
        assert_eq!(updates(json!({})), ParticipantUpdates::default());
    }

    #[rstest]
    #[case(json!({"secretDraw": ""}), Some(Some(String::new())))]
    #[case(json!({"secretDraw": null}), Some(None))]
    #[case(json!({"secretDraw": "Bob"}), Some(Some("Bob".to_owned())))]
    fn present_secret_draw_is_an_update(
        #[case] body: serde_json::Value,
        #[case] expected: Option<Option<String>>,
    ) {
        assert_eq!(updates(body).secret_draw, expected);
    }

    #[rstest]
    fn null_email_is_kept_apart_from_absent_email() {
        let parsed = updates(json!({"email": null, "name": "Al"}));
        assert_eq!(parsed.email, Some(None));
        assert_eq!(parsed.name.as_deref(), Some("Al"));
    }

    #[rstest]
    #[case(json!({"userId": "u1", "giftExchangeId": "x1"}))]
    #[case(json!({"_id": "u1", "giftExchangeId": "x1"}))]
    fn user_id_accepts_both_keys(#[case] body: serde_json::Value) {
        let target: ExchangeTarget = serde_json::from_value(body).expect("target");
        assert_eq!(
            ExchangeLocator::from(target),
            ExchangeLocator::new("u1", "x1")
        );
    }

    #[rstest]
    fn flattened_locator_fields_reach_the_request() {
        let body: RestrictionBody = serde_json::from_value(json!({
            "userId": "u",
            "giftExchangeId": "x",
            "drawingId": "d",
            "participantId": "p",
            "restrictionName": "Bob",
        }))
        .expect("restriction body");

        let request = RestrictionRequest::from(body);
        assert_eq!(request.participant, ParticipantLocator::new("u", "x", "d", "p"));
        assert_eq!(request.restriction_name.as_deref(), Some("Bob"));
    }

    #[rstest]
    fn new_participant_is_optional() {
        let body: AddParticipantBody =
            serde_json::from_value(json!({"userId": "u", "giftExchangeId": "x", "drawingId": "d"}))
                .expect("participant body");
        assert!(AddParticipantRequest::from(body).participant.is_none());
    }
}
