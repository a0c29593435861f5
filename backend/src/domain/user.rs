//! User documents: the root of every gift exchange tree.
//!
//! A [`User`] is stored and replaced as a single nested document. Each write
//! against it advances `revision` so concurrent read-modify-write cycles can
//! detect that they raced.

use serde::{Deserialize, Serialize};

use super::{
    Draw, DrawId, EmailAddress, GiftExchange, GiftExchangeId, Participant, ParticipantId, UserId,
};

/// Data needed to create a user before the store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
}

/// Top-level user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: EmailAddress,
    #[serde(default)]
    pub gift_exchanges: Vec<GiftExchange>,
    #[serde(default, skip_serializing)]
    pub revision: u32,
}

impl User {
    /// Materialise a freshly inserted document.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            email: new_user.email,
            gift_exchanges: Vec::new(),
            revision: 1,
        }
    }

    pub fn gift_exchange(&self, id: &GiftExchangeId) -> Option<&GiftExchange> {
        self.gift_exchanges.iter().find(|x| &x.id == id)
    }

    pub fn gift_exchange_mut(&mut self, id: &GiftExchangeId) -> Option<&mut GiftExchange> {
        self.gift_exchanges.iter_mut().find(|x| &x.id == id)
    }

    /// True when an exchange other than `except` already uses `name`.
    pub fn has_gift_exchange_named(&self, name: &str, except: Option<&GiftExchangeId>) -> bool {
        self.gift_exchanges
            .iter()
            .any(|x| x.name == name && Some(&x.id) != except)
    }

    pub fn remove_gift_exchange(&mut self, id: &GiftExchangeId) -> Option<GiftExchange> {
        let index = self.gift_exchanges.iter().position(|x| &x.id == id)?;
        Some(self.gift_exchanges.remove(index))
    }

    /// Walk exchange then drawing, stopping at the first missing link.
    pub fn draw_mut(&mut self, exchange_id: &GiftExchangeId, draw_id: &DrawId) -> Option<&mut Draw> {
        self.gift_exchange_mut(exchange_id)?.draw_mut(draw_id)
    }

    /// Walk exchange, drawing, and participant.
    pub fn participant_mut(
        &mut self,
        exchange_id: &GiftExchangeId,
        draw_id: &DrawId,
        participant_id: &ParticipantId,
    ) -> Option<&mut Participant> {
        self.draw_mut(exchange_id, draw_id)?
            .participant_mut(participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn user() -> User {
        let email = EmailAddress::new("owner@example.com").expect("valid email");
        let mut user = User::from_new(UserId::random(), NewUser { email });
        let mut exchange = GiftExchange::new("Family");
        let mut draw = Draw::new(2024);
        draw.participants.push(Participant::new("Alice", None));
        exchange.draws.push(draw);
        user.gift_exchanges.push(exchange);
        user
    }

    #[rstest]
    fn new_documents_start_at_revision_one(user: User) {
        assert_eq!(user.revision, 1);
    }

    #[rstest]
    fn participant_lookup_walks_the_full_chain(mut user: User) {
        let exchange_id = user.gift_exchanges[0].id;
        let draw_id = user.gift_exchanges[0].draws[0].id;
        let participant_id = user.gift_exchanges[0].draws[0].participants[0].id;

        assert!(
            user.participant_mut(&exchange_id, &draw_id, &participant_id)
                .is_some()
        );
        assert!(
            user.participant_mut(&GiftExchangeId::random(), &draw_id, &participant_id)
                .is_none()
        );
        assert!(
            user.participant_mut(&exchange_id, &DrawId::random(), &participant_id)
                .is_none()
        );
    }

    #[rstest]
    fn exchange_names_are_compared_exactly(user: User) {
        let family = user.gift_exchanges[0].id;

        assert!(user.has_gift_exchange_named("Family", None));
        assert!(!user.has_gift_exchange_named("family", None));
        assert!(!user.has_gift_exchange_named("Family", Some(&family)));
    }

    #[rstest]
    fn serialised_documents_hide_the_revision(user: User) {
        let value = serde_json::to_value(&user).expect("user serialises");

        assert!(value.get("revision").is_none());
        assert_eq!(value["email"], json!("owner@example.com"));
        assert_eq!(value["giftExchanges"][0]["name"], json!("Family"));
        assert_eq!(value["giftExchanges"][0]["draws"][0]["year"], json!(2024));
    }
}
