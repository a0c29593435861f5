//! Opaque identifiers for users and their nested gift exchange entities.
//!
//! Every identifier is a UUID rendered as a string on the wire. Identifiers
//! are only minted when an entity is created; clients echo them back to
//! address the entity in later mutations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// The identifier was empty or whitespace.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier was not a canonical UUID.
    #[error("identifier must be a valid UUID")]
    Invalid,
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = EntityIdError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                if raw.trim().is_empty() {
                    return Err(EntityIdError::Empty);
                }
                if raw.trim() != raw {
                    return Err(EntityIdError::Invalid);
                }
                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| EntityIdError::Invalid)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EntityIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a [`crate::domain::User`] document.
    UserId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::GiftExchange`] within its owning user.
    GiftExchangeId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::Draw`] within its gift exchange.
    DrawId
}

define_entity_id! {
    /// Identifier of a [`crate::domain::Participant`] within its drawing.
    ParticipantId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VALID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    fn parses_canonical_uuids() {
        let id: UserId = VALID.parse().expect("valid uuid");
        assert_eq!(id.to_string(), VALID);
    }

    #[rstest]
    #[case("", EntityIdError::Empty)]
    #[case("   ", EntityIdError::Empty)]
    #[case("not-a-uuid", EntityIdError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", EntityIdError::Invalid)]
    fn rejects_malformed_input(#[case] raw: &str, #[case] expected: EntityIdError) {
        assert_eq!(raw.parse::<DrawId>(), Err(expected));
    }

    #[rstest]
    fn random_identifiers_are_distinct() {
        assert_ne!(ParticipantId::random(), ParticipantId::random());
    }

    #[rstest]
    fn serialises_as_a_plain_string() {
        let id: GiftExchangeId = VALID.parse().expect("valid uuid");
        let value = serde_json::to_value(id).expect("id serialises");
        assert_eq!(value, serde_json::json!(VALID));

        let decoded: GiftExchangeId = serde_json::from_value(value).expect("id deserialises");
        assert_eq!(decoded, id);
    }
}
