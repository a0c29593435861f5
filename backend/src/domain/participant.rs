//! Drawing participants and their pairing restrictions.

use serde::{Deserialize, Serialize};

use super::{EmailAddress, ParticipantId};

/// Ordered set of participant names a participant must not be paired with.
///
/// Insertion order is preserved and duplicates are never stored.
///
/// # Examples
/// ```
/// use gift_exchange_backend::domain::Restrictions;
///
/// let mut restrictions = Restrictions::default();
/// assert!(restrictions.insert("Bob"));
/// assert!(!restrictions.insert("Bob"));
/// assert_eq!(restrictions.as_slice(), ["Bob".to_owned()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Restrictions(Vec<String>);

impl Restrictions {
    /// Add `name` unless it is already present. Returns `true` when stored.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    /// Remove every occurrence of `name`. Returns `true` when something went.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != name);
        self.0.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Restrictions {
    fn from(values: Vec<String>) -> Self {
        let mut restrictions = Self::default();
        for value in values {
            restrictions.insert(value);
        }
        restrictions
    }
}

impl From<Restrictions> for Vec<String> {
    fn from(value: Restrictions) -> Self {
        value.0
    }
}

/// Field changes applied by a participant update.
///
/// `None` leaves a field untouched. For `email`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantPatch {
    pub name: Option<String>,
    pub email: Option<Option<EmailAddress>>,
    pub secret_draw: Option<String>,
}

/// A person taking part in a single drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,
    #[serde(default)]
    pub secret_draw: String,
    #[serde(default)]
    pub restrictions: Restrictions,
}

impl Participant {
    /// Create a participant with a fresh identifier and no assignment.
    pub fn new(name: impl Into<String>, email: Option<EmailAddress>) -> Self {
        Self {
            id: ParticipantId::random(),
            name: name.into(),
            email,
            secret_draw: String::new(),
            restrictions: Restrictions::default(),
        }
    }

    /// Apply `patch`, returning `true` when any stored value changed.
    pub fn apply(&mut self, patch: &ParticipantPatch) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.name {
            changed |= replace_if_different(&mut self.name, name.clone());
        }
        if let Some(email) = &patch.email {
            changed |= replace_if_different(&mut self.email, email.clone());
        }
        if let Some(secret_draw) = &patch.secret_draw {
            changed |= replace_if_different(&mut self.secret_draw, secret_draw.clone());
        }
        changed
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
