//! Driving port for mutations of the user document tree.
//!
//! Requests carry raw, unvalidated inputs exactly as clients supplied them.
//! Implementations check presence of every required input in nesting order
//! before parsing any of them, so the first missing field reported is always
//! the outermost one.

use async_trait::async_trait;

use crate::domain::{GiftExchangeError, User};

use super::UpdateCounts;

/// Addresses a gift exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeLocator {
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
}

/// Addresses a drawing inside a gift exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingLocator {
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
    pub drawing_id: Option<String>,
}

/// Addresses a participant inside a drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantLocator {
    pub user_id: Option<String>,
    pub gift_exchange_id: Option<String>,
    pub drawing_id: Option<String>,
    pub participant_id: Option<String>,
}

impl ExchangeLocator {
    pub fn new(user_id: impl Into<String>, gift_exchange_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            gift_exchange_id: Some(gift_exchange_id.into()),
        }
    }
}

impl DrawingLocator {
    pub fn new(
        user_id: impl Into<String>,
        gift_exchange_id: impl Into<String>,
        drawing_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            gift_exchange_id: Some(gift_exchange_id.into()),
            drawing_id: Some(drawing_id.into()),
        }
    }
}

impl ParticipantLocator {
    pub fn new(
        user_id: impl Into<String>,
        gift_exchange_id: impl Into<String>,
        drawing_id: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            gift_exchange_id: Some(gift_exchange_id.into()),
            drawing_id: Some(drawing_id.into()),
            participant_id: Some(participant_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteUserRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddGiftExchangeRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameGiftExchangeRequest {
    pub exchange: ExchangeLocator,
    pub new_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDrawingRequest {
    pub exchange: ExchangeLocator,
    pub year: Option<i64>,
}

/// Participant details supplied when joining a drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewParticipantInput {
    pub name: Option<String>,
    /// Blank means "no email".
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddParticipantRequest {
    pub drawing: DrawingLocator,
    pub participant: Option<NewParticipantInput>,
}

/// Field changes for an existing participant.
///
/// The outer `Option` records whether a field was supplied at all. For
/// `email` and `secret_draw` an inner `None` or blank string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantUpdates {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub secret_draw: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateParticipantRequest {
    pub participant: ParticipantLocator,
    pub updates: Option<ParticipantUpdates>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionRequest {
    pub participant: ParticipantLocator,
    pub restriction_name: Option<String>,
}

/// Driving port for gift exchange mutations.
///
/// Operations that insert or remove array elements return the whole updated
/// document. Operations that change a single nested element in place return
/// [`UpdateCounts`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GiftExchangeCommand: Send + Sync {
    /// Register a user by email.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, GiftExchangeError>;

    /// Delete a user document, returning how many documents went.
    async fn delete_user(&self, request: DeleteUserRequest) -> Result<u64, GiftExchangeError>;

    async fn add_gift_exchange(
        &self,
        request: AddGiftExchangeRequest,
    ) -> Result<User, GiftExchangeError>;

    async fn rename_gift_exchange(
        &self,
        request: RenameGiftExchangeRequest,
    ) -> Result<UpdateCounts, GiftExchangeError>;

    async fn delete_gift_exchange(
        &self,
        request: ExchangeLocator,
    ) -> Result<User, GiftExchangeError>;

    /// Add a drawing for a year; a year that already has one is a no-op.
    async fn add_drawing(&self, request: AddDrawingRequest) -> Result<User, GiftExchangeError>;

    async fn delete_drawing(&self, request: DrawingLocator) -> Result<User, GiftExchangeError>;

    /// Add a participant; a name already in the drawing is a no-op.
    async fn add_participant(
        &self,
        request: AddParticipantRequest,
    ) -> Result<User, GiftExchangeError>;

    async fn delete_participant(
        &self,
        request: ParticipantLocator,
    ) -> Result<User, GiftExchangeError>;

    async fn update_participant(
        &self,
        request: UpdateParticipantRequest,
    ) -> Result<UpdateCounts, GiftExchangeError>;

    async fn add_restriction(
        &self,
        request: RestrictionRequest,
    ) -> Result<UpdateCounts, GiftExchangeError>;

    async fn delete_restriction(
        &self,
        request: RestrictionRequest,
    ) -> Result<UpdateCounts, GiftExchangeError>;
}
