//! Failures raised by gift exchange operations.
//!
//! Every variant maps onto one [`ErrorCode`] when crossing into the transport
//! payload, with `details` naming the offending field or entity.

use std::fmt;

use serde_json::json;

use super::ports::UserDocumentStoreError;
use super::{Error, ErrorCode};

/// Levels of the nested document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    GiftExchange,
    Drawing,
    Participant,
}

impl EntityKind {
    /// Wire name reported in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::GiftExchange => "giftExchange",
            Self::Drawing => "drawing",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::GiftExchange => "gift exchange",
            Self::Drawing => "drawing",
            Self::Participant => "participant",
        })
    }
}

/// Request inputs an operation may reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestField {
    Email,
    UserId,
    GiftExchangeId,
    Name,
    NewName,
    DrawingYear,
    DrawingId,
    NewParticipant,
    ParticipantName,
    ParticipantEmail,
    ParticipantId,
    Updates,
    UpdatedName,
    UpdatedEmail,
    RestrictionName,
}

impl RequestField {
    /// Field path as it appears in request bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::UserId => "userId",
            Self::GiftExchangeId => "giftExchangeId",
            Self::Name => "name",
            Self::NewName => "newName",
            Self::DrawingYear => "drawingYear",
            Self::DrawingId => "drawingId",
            Self::NewParticipant => "newParticipant",
            Self::ParticipantName => "newParticipant.name",
            Self::ParticipantEmail => "newParticipant.email",
            Self::ParticipantId => "participantId",
            Self::Updates => "updates",
            Self::UpdatedName => "updates.name",
            Self::UpdatedEmail => "updates.email",
            Self::RestrictionName => "restrictionName",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a write was refused as conflicting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictReason {
    EmailTaken,
    NameTaken,
    ConcurrentModification,
}

impl ConflictReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmailTaken => "email_taken",
            Self::NameTaken => "name_taken",
            Self::ConcurrentModification => "concurrent_modification",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmailTaken => "email address is already registered",
            Self::NameTaken => "name is already in use",
            Self::ConcurrentModification => "document was modified concurrently",
        })
    }
}

/// Error returned by [`crate::domain::ports::GiftExchangeCommand`] and
/// [`crate::domain::ports::UserDirectoryQuery`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GiftExchangeError {
    #[error("missing required field: {field}")]
    MissingField { field: RequestField },
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} conflict: {reason}")]
    Conflict {
        kind: EntityKind,
        reason: ConflictReason,
    },
    #[error("invalid {field}: {message}")]
    Validation {
        field: RequestField,
        message: String,
    },
    #[error(transparent)]
    Store(#[from] UserDocumentStoreError),
}

impl GiftExchangeError {
    pub fn missing_field(field: RequestField) -> Self {
        Self::MissingField { field }
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn conflict(kind: EntityKind, reason: ConflictReason) -> Self {
        Self::Conflict { kind, reason }
    }

    pub fn validation(field: RequestField, message: impl fmt::Display) -> Self {
        Self::Validation {
            field,
            message: message.to_string(),
        }
    }
}

impl From<GiftExchangeError> for Error {
    fn from(error: GiftExchangeError) -> Self {
        let message = error.to_string();
        match error {
            GiftExchangeError::MissingField { field } => Error::invalid_request(message)
                .with_details(json!({ "field": field.as_str(), "code": "missing_field" })),
            GiftExchangeError::Validation { field, .. } => Error::invalid_request(message)
                .with_details(json!({ "field": field.as_str(), "code": "invalid_value" })),
            GiftExchangeError::NotFound { kind, id } => Error::not_found(message)
                .with_details(json!({ "entity": kind.as_str(), "id": id })),
            GiftExchangeError::Conflict { kind, reason } => Error::conflict(message)
                .with_details(json!({ "entity": kind.as_str(), "code": reason.as_str() })),
            GiftExchangeError::Store(UserDocumentStoreError::DuplicateEmail { .. }) => {
                Error::conflict(message).with_details(json!({
                    "entity": EntityKind::User.as_str(),
                    "code": ConflictReason::EmailTaken.as_str(),
                }))
            }
            GiftExchangeError::Store(UserDocumentStoreError::Connection { .. }) => {
                Error::new(ErrorCode::ServiceUnavailable, message)
            }
            GiftExchangeError::Store(_) => Error::internal(message),
        }
    }
}
