//! Gift exchanges and their yearly drawings.

use serde::{Deserialize, Serialize};

use super::{DrawId, GiftExchangeId, Participant, ParticipantId};

/// One round of an exchange, identified by its year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draw {
    #[serde(rename = "_id")]
    pub id: DrawId,
    pub year: i32,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl Draw {
    pub fn new(year: i32) -> Self {
        Self {
            id: DrawId::random(),
            year,
            participants: Vec::new(),
        }
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn participant_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == id)
    }

    /// True when a participant other than `except` is already called `name`.
    pub fn has_participant_named(&self, name: &str, except: Option<&ParticipantId>) -> bool {
        self.participants
            .iter()
            .any(|p| p.name == name && Some(&p.id) != except)
    }

    pub fn remove_participant(&mut self, id: &ParticipantId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }
}

/// A named recurring exchange owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftExchange {
    #[serde(rename = "_id")]
    pub id: GiftExchangeId,
    pub name: String,
    #[serde(default)]
    pub draws: Vec<Draw>,
}

impl GiftExchange {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GiftExchangeId::random(),
            name: name.into(),
            draws: Vec::new(),
        }
    }

    /// Replace the name, returning `true` when it changed.
    pub fn rename(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        name.clone_into(&mut self.name);
        true
    }

    pub fn draw(&self, id: &DrawId) -> Option<&Draw> {
        self.draws.iter().find(|d| &d.id == id)
    }

    pub fn draw_mut(&mut self, id: &DrawId) -> Option<&mut Draw> {
        self.draws.iter_mut().find(|d| &d.id == id)
    }

    pub fn has_draw_for_year(&self, year: i32) -> bool {
        self.draws.iter().any(|d| d.year == year)
    }

    pub fn remove_draw(&mut self, id: &DrawId) -> Option<Draw> {
        let index = self.draws.iter().position(|d| &d.id == id)?;
        Some(self.draws.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn family() -> GiftExchange {
        let mut exchange = GiftExchange::new("Family");
        let mut draw = Draw::new(2024);
        draw.participants.push(Participant::new("Alice", None));
        exchange.draws.push(draw);
        exchange
    }

    #[rstest]
    fn rename_detects_unchanged_names(mut family: GiftExchange) {
        assert!(!family.rename("Family"));
        assert!(family.rename("Friends"));
        assert_eq!(family.name, "Friends");
    }

    #[rstest]
    fn remove_draw_drops_nested_participants(mut family: GiftExchange) {
        let draw_id = family.draws[0].id;

        let removed = family.remove_draw(&draw_id).expect("draw exists");

        assert_eq!(removed.participants.len(), 1);
        assert!(family.draws.is_empty());
        assert!(family.remove_draw(&draw_id).is_none());
    }

    #[rstest]
    fn participant_name_check_skips_the_excluded_participant(family: GiftExchange) {
        let draw = &family.draws[0];
        let alice = draw.participants[0].id;

        assert!(draw.has_participant_named("Alice", None));
        assert!(!draw.has_participant_named("Alice", Some(&alice)));
    }

    #[rstest]
    fn year_lookup_matches_existing_draws(family: GiftExchange) {
        assert!(family.has_draw_for_year(2024));
        assert!(!family.has_draw_for_year(2025));
    }
}
