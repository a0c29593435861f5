//! Port for the nested user document store.
//!
//! Adapters persist whole [`User`] documents and support two write styles:
//! whole-document replacement guarded by a revision check, and targeted
//! in-place updates addressed by a [`NestedSelector`]. Targeted updates are
//! interpreted by [`apply_targeted_update`] so every adapter shares one set of
//! matching rules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    DrawId, EmailAddress, GiftExchangeId, NewUser, ParticipantId, ParticipantPatch, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user document store adapters.
    pub enum UserDocumentStoreError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "user document store connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } =>
            "user document store query failed: {message}",
        /// The stored document moved on since it was read.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// Another document already holds this email address.
        DuplicateEmail { email: String } =>
            "a user with email {email} already exists",
        /// A rename collided with a sibling's name.
        NameTaken { name: String } =>
            "the name {name} is already used by a sibling",
    }
}

/// Top-level document filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Id(UserId),
    Email(EmailAddress),
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::Id(id) => &user.id == id,
            Self::Email(email) => &user.email == email,
        }
    }
}

/// Path to a nested element inside a user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedSelector {
    GiftExchange {
        gift_exchange_id: GiftExchangeId,
    },
    Participant {
        gift_exchange_id: GiftExchangeId,
        draw_id: DrawId,
        participant_id: ParticipantId,
    },
}

/// In-place change applied to the element a [`NestedSelector`] resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetedUpdate {
    /// Set the exchange name. Requires a gift exchange selector.
    RenameGiftExchange { name: String },
    /// Overwrite the named participant fields. Requires a participant selector.
    SetParticipantFields(ParticipantPatch),
    /// Add a restriction unless present. Requires a participant selector.
    AddRestriction { name: String },
    /// Remove every matching restriction. Requires a participant selector.
    PullRestriction { name: String },
}

/// Outcome of a targeted update.
///
/// `matched_count` is 1 when the selector resolved to an element and
/// `modified_count` is 1 when that element's content changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCounts {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateCounts {
    pub const UNMATCHED: Self = Self {
        matched_count: 0,
        modified_count: 0,
    };

    pub const fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: if modified { 1 } else { 0 },
        }
    }
}

/// Apply `update` to the element `selector` addresses inside `user`.
///
/// Renames are checked against sibling names inside this routine, under the
/// adapter's lock or transaction. A collision fails with
/// [`UserDocumentStoreError::NameTaken`] and leaves `user` untouched.
///
/// Leaves `user.revision` alone; adapters advance it when
/// `modified_count` is non-zero.
///
/// # Examples
/// ```
/// use gift_exchange_backend::domain::ports::{
///     NestedSelector, TargetedUpdate, UpdateCounts, apply_targeted_update,
/// };
/// use gift_exchange_backend::domain::{EmailAddress, GiftExchange, NewUser, User, UserId};
///
/// let email = EmailAddress::new("a@example.com").expect("valid email");
/// let mut user = User::from_new(UserId::random(), NewUser { email });
/// let exchange = GiftExchange::new("Family");
/// let selector = NestedSelector::GiftExchange { gift_exchange_id: exchange.id };
/// user.gift_exchanges.push(exchange);
///
/// let update = TargetedUpdate::RenameGiftExchange { name: "Friends".into() };
/// let counts = apply_targeted_update(&mut user, &selector, &update).expect("shapes agree");
/// assert_eq!(counts, UpdateCounts::matched(true));
/// ```
pub fn apply_targeted_update(
    user: &mut User,
    selector: &NestedSelector,
    update: &TargetedUpdate,
) -> Result<UpdateCounts, UserDocumentStoreError> {
    match (selector, update) {
        (
            NestedSelector::GiftExchange { gift_exchange_id },
            TargetedUpdate::RenameGiftExchange { name },
        ) => {
            let taken = user.has_gift_exchange_named(name, Some(gift_exchange_id));
            let Some(exchange) = user.gift_exchange_mut(gift_exchange_id) else {
                return Ok(UpdateCounts::UNMATCHED);
            };
            if taken {
                return Err(UserDocumentStoreError::name_taken(name.as_str()));
            }
            Ok(UpdateCounts::matched(exchange.rename(name)))
        }
        (
            NestedSelector::Participant {
                gift_exchange_id,
                draw_id,
                participant_id,
            },
            TargetedUpdate::SetParticipantFields(_)
            | TargetedUpdate::AddRestriction { .. }
            | TargetedUpdate::PullRestriction { .. },
        ) => {
            let Some(draw) = user.draw_mut(gift_exchange_id, draw_id) else {
                return Ok(UpdateCounts::UNMATCHED);
            };
            let taken = match update {
                TargetedUpdate::SetParticipantFields(patch) => patch
                    .name
                    .as_deref()
                    .filter(|name| draw.has_participant_named(name, Some(participant_id))),
                _ => None,
            };
            let Some(participant) = draw.participant_mut(participant_id) else {
                return Ok(UpdateCounts::UNMATCHED);
            };
            if let Some(name) = taken {
                return Err(UserDocumentStoreError::name_taken(name));
            }
            let modified = match update {
                TargetedUpdate::SetParticipantFields(patch) => participant.apply(patch),
                TargetedUpdate::AddRestriction { name } => {
                    participant.restrictions.insert(name.as_str())
                }
                TargetedUpdate::PullRestriction { name } => participant.restrictions.remove(name),
                TargetedUpdate::RenameGiftExchange { .. } => false,
            };
            Ok(UpdateCounts::matched(modified))
        }
        _ => Err(UserDocumentStoreError::query(format!(
            "update {update:?} cannot target {selector:?}"
        ))),
    }
}

/// Port for user document storage.
///
/// # Revision semantics
///
/// - Inserted documents start at revision 1.
/// - Every write that changes a document advances its revision by one.
/// - [`UserDocumentStore::save`] succeeds only when the stored revision
///   still equals `user.revision`; otherwise it fails with
///   [`UserDocumentStoreError::RevisionMismatch`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Fetch the first document matching `filter`.
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, UserDocumentStoreError>;

    /// Fetch a document by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDocumentStoreError> {
        self.find_one(&UserFilter::Id(*id)).await
    }

    /// Insert a new document, assigning its identifier.
    ///
    /// Fails with [`UserDocumentStoreError::DuplicateEmail`] when the email
    /// is already registered.
    async fn insert(&self, new_user: NewUser) -> Result<User, UserDocumentStoreError>;

    /// Delete every document matching `filter`, returning how many went.
    async fn delete_where(&self, filter: &UserFilter) -> Result<u64, UserDocumentStoreError>;

    /// Atomically apply a targeted update inside one document.
    ///
    /// A missing user yields [`UpdateCounts::UNMATCHED`].
    async fn update_targeted(
        &self,
        user_id: &UserId,
        selector: &NestedSelector,
        update: &TargetedUpdate,
    ) -> Result<UpdateCounts, UserDocumentStoreError>;

    /// Replace a whole document, guarded by its revision.
    ///
    /// Returns the stored document carrying its new revision.
    async fn save(&self, user: &User) -> Result<User, UserDocumentStoreError>;
}
