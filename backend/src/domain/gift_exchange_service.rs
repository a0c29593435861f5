//! Gift exchange mutation service.
//!
//! Implements [`GiftExchangeCommand`] and [`UserDirectoryQuery`] on top of a
//! [`UserDocumentStore`]. Every operation runs the same phases: check that
//! required inputs are present, parse them, resolve the target chain, enforce
//! uniqueness, then issue at most one store write.
//!
//! In-place changes to a single element (renames, participant field updates
//! and restriction edits) go through [`UserDocumentStore::update_targeted`],
//! which the store applies atomically. Adding or removing array elements uses
//! a revision-guarded read-modify-save cycle that is retried once when another
//! writer got there first.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AddDrawingRequest, AddGiftExchangeRequest, AddParticipantRequest, CreateUserRequest,
    DeleteUserRequest, DrawingLocator, ExchangeLocator, GiftExchangeCommand, NestedSelector,
    ParticipantLocator, RenameGiftExchangeRequest, RestrictionRequest, TargetedUpdate,
    UpdateCounts, UpdateParticipantRequest, UserDirectoryQuery, UserDocumentStore,
    UserDocumentStoreError, UserFilter,
};
use crate::domain::{
    ConflictReason, Draw, DrawId, EmailAddress, EntityIdError, EntityKind, GiftExchange,
    GiftExchangeError, GiftExchangeId, NewUser, Participant, ParticipantId, ParticipantPatch,
    RequestField, User, UserId,
};

/// Number of read-modify-save attempts before a revision race is reported.
const SAVE_ATTEMPTS: u32 = 2;

/// Gift exchange service implementing the driving ports.
#[derive(Clone)]
pub struct GiftExchangeService<S> {
    store: Arc<S>,
}

impl<S> GiftExchangeService<S> {
    /// Create a new service backed by `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn present(value: Option<&str>, field: RequestField) -> Result<&str, GiftExchangeError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(GiftExchangeError::missing_field(field)),
    }
}

fn parse_id<I>(value: Option<&str>, field: RequestField) -> Result<I, GiftExchangeError>
where
    I: FromStr<Err = EntityIdError>,
{
    present(value, field)?
        .parse()
        .map_err(|err| GiftExchangeError::validation(field, err))
}

fn parse_email(value: &str, field: RequestField) -> Result<EmailAddress, GiftExchangeError> {
    EmailAddress::new(value).map_err(|err| GiftExchangeError::validation(field, err))
}

/// Blank or absent input means "no email".
fn parse_optional_email(
    value: Option<&str>,
    field: RequestField,
) -> Result<Option<EmailAddress>, GiftExchangeError> {
    match value {
        Some(value) if !value.trim().is_empty() => parse_email(value, field).map(Some),
        _ => Ok(None),
    }
}

struct ExchangePath {
    user_id: UserId,
    gift_exchange_id: GiftExchangeId,
}

struct DrawingPath {
    user_id: UserId,
    gift_exchange_id: GiftExchangeId,
    draw_id: DrawId,
}

struct ParticipantPath {
    user_id: UserId,
    gift_exchange_id: GiftExchangeId,
    draw_id: DrawId,
    participant_id: ParticipantId,
}

impl ParticipantPath {
    fn selector(&self) -> NestedSelector {
        NestedSelector::Participant {
            gift_exchange_id: self.gift_exchange_id,
            draw_id: self.draw_id,
            participant_id: self.participant_id,
        }
    }
}

/// Raw identifier chain carried by a request.
trait Locator {
    type Path;

    /// Fail on the outermost absent identifier.
    fn check_present(&self) -> Result<(), GiftExchangeError>;

    fn parse(&self) -> Result<Self::Path, GiftExchangeError>;
}

impl Locator for ExchangeLocator {
    type Path = ExchangePath;

    fn check_present(&self) -> Result<(), GiftExchangeError> {
        present(self.user_id.as_deref(), RequestField::UserId)?;
        present(self.gift_exchange_id.as_deref(), RequestField::GiftExchangeId)?;
        Ok(())
    }

    fn parse(&self) -> Result<Self::Path, GiftExchangeError> {
        Ok(ExchangePath {
            user_id: parse_id(self.user_id.as_deref(), RequestField::UserId)?,
            gift_exchange_id: parse_id(
                self.gift_exchange_id.as_deref(),
                RequestField::GiftExchangeId,
            )?,
        })
    }
}

impl Locator for DrawingLocator {
    type Path = DrawingPath;

    fn check_present(&self) -> Result<(), GiftExchangeError> {
        present(self.user_id.as_deref(), RequestField::UserId)?;
        present(self.gift_exchange_id.as_deref(), RequestField::GiftExchangeId)?;
        present(self.drawing_id.as_deref(), RequestField::DrawingId)?;
        Ok(())
    }

    fn parse(&self) -> Result<Self::Path, GiftExchangeError> {
        Ok(DrawingPath {
            user_id: parse_id(self.user_id.as_deref(), RequestField::UserId)?,
            gift_exchange_id: parse_id(
                self.gift_exchange_id.as_deref(),
                RequestField::GiftExchangeId,
            )?,
            draw_id: parse_id(self.drawing_id.as_deref(), RequestField::DrawingId)?,
        })
    }
}

impl Locator for ParticipantLocator {
    type Path = ParticipantPath;

    fn check_present(&self) -> Result<(), GiftExchangeError> {
        present(self.user_id.as_deref(), RequestField::UserId)?;
        present(self.gift_exchange_id.as_deref(), RequestField::GiftExchangeId)?;
        present(self.drawing_id.as_deref(), RequestField::DrawingId)?;
        present(self.participant_id.as_deref(), RequestField::ParticipantId)?;
        Ok(())
    }

    fn parse(&self) -> Result<Self::Path, GiftExchangeError> {
        Ok(ParticipantPath {
            user_id: parse_id(self.user_id.as_deref(), RequestField::UserId)?,
            gift_exchange_id: parse_id(
                self.gift_exchange_id.as_deref(),
                RequestField::GiftExchangeId,
            )?,
            draw_id: parse_id(self.drawing_id.as_deref(), RequestField::DrawingId)?,
            participant_id: parse_id(self.participant_id.as_deref(), RequestField::ParticipantId)?,
        })
    }
}

fn find_exchange<'u>(
    user: &'u User,
    id: &GiftExchangeId,
) -> Result<&'u GiftExchange, GiftExchangeError> {
    user.gift_exchange(id)
        .ok_or_else(|| GiftExchangeError::not_found(EntityKind::GiftExchange, id))
}

fn find_draw<'u>(user: &'u User, path: &ParticipantPath) -> Result<&'u Draw, GiftExchangeError> {
    find_exchange(user, &path.gift_exchange_id)?
        .draw(&path.draw_id)
        .ok_or_else(|| GiftExchangeError::not_found(EntityKind::Drawing, path.draw_id))
}

fn find_participant<'u>(
    user: &'u User,
    path: &ParticipantPath,
) -> Result<&'u Participant, GiftExchangeError> {
    find_draw(user, path)?
        .participant(&path.participant_id)
        .ok_or_else(|| GiftExchangeError::not_found(EntityKind::Participant, path.participant_id))
}

fn exchange_mut<'u>(
    user: &'u mut User,
    id: &GiftExchangeId,
) -> Result<&'u mut GiftExchange, GiftExchangeError> {
    user.gift_exchange_mut(id)
        .ok_or_else(|| GiftExchangeError::not_found(EntityKind::GiftExchange, id))
}

fn draw_mut<'u>(
    user: &'u mut User,
    gift_exchange_id: &GiftExchangeId,
    draw_id: &DrawId,
) -> Result<&'u mut Draw, GiftExchangeError> {
    exchange_mut(user, gift_exchange_id)?
        .draw_mut(draw_id)
        .ok_or_else(|| GiftExchangeError::not_found(EntityKind::Drawing, draw_id))
}

fn parse_year(year: i64) -> Result<i32, GiftExchangeError> {
    i32::try_from(year)
        .ok()
        .filter(|year| *year > 0)
        .ok_or_else(|| {
            GiftExchangeError::validation(
                RequestField::DrawingYear,
                "year must be a positive integer",
            )
        })
}

impl<S> GiftExchangeService<S>
where
    S: UserDocumentStore,
{
    async fn load_user(&self, user_id: &UserId) -> Result<User, GiftExchangeError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| GiftExchangeError::not_found(EntityKind::User, user_id))
    }

    /// Load, mutate and save a user document under a revision guard.
    ///
    /// `mutate` returns `false` when it left the document untouched, in which
    /// case nothing is written and the loaded document is returned.
    async fn modify_and_save<F>(
        &self,
        user_id: &UserId,
        mut mutate: F,
    ) -> Result<User, GiftExchangeError>
    where
        F: FnMut(&mut User) -> Result<bool, GiftExchangeError> + Send,
    {
        let mut attempt = 1;
        loop {
            let mut user = self.load_user(user_id).await?;
            if !mutate(&mut user)? {
                return Ok(user);
            }
            match self.store.save(&user).await {
                Ok(saved) => return Ok(saved),
                Err(UserDocumentStoreError::RevisionMismatch { expected, actual })
                    if attempt < SAVE_ATTEMPTS =>
                {
                    warn!(%user_id, expected, actual, "user document changed concurrently, retrying");
                    attempt += 1;
                }
                Err(UserDocumentStoreError::RevisionMismatch { .. }) => {
                    return Err(GiftExchangeError::conflict(
                        EntityKind::User,
                        ConflictReason::ConcurrentModification,
                    ));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Issue one targeted update addressed at `target`.
    ///
    /// Nothing matched becomes `NotFound` and a sibling name collision
    /// becomes `Conflict`, both reported against `target`.
    async fn update_in_place(
        &self,
        user_id: &UserId,
        selector: &NestedSelector,
        update: &TargetedUpdate,
        target: (EntityKind, String),
    ) -> Result<UpdateCounts, GiftExchangeError> {
        let (kind, id) = target;
        let counts = match self.store.update_targeted(user_id, selector, update).await {
            Ok(counts) => counts,
            Err(UserDocumentStoreError::NameTaken { .. }) => {
                return Err(GiftExchangeError::conflict(kind, ConflictReason::NameTaken));
            }
            Err(err) => return Err(err.into()),
        };
        if counts.matched_count == 0 {
            return Err(GiftExchangeError::not_found(kind, id));
        }
        debug!(
            %user_id,
            matched = counts.matched_count,
            modified = counts.modified_count,
            "targeted update applied"
        );
        Ok(counts)
    }

    async fn edit_restriction(
        &self,
        request: RestrictionRequest,
        update: fn(String) -> TargetedUpdate,
    ) -> Result<UpdateCounts, GiftExchangeError> {
        request.participant.check_present()?;
        let name = present(
            request.restriction_name.as_deref(),
            RequestField::RestrictionName,
        )?;
        let path = request.participant.parse()?;

        let user = self.load_user(&path.user_id).await?;
        find_participant(&user, &path)?;

        self.update_in_place(
            &path.user_id,
            &path.selector(),
            &update(name.to_owned()),
            (EntityKind::Participant, path.participant_id.to_string()),
        )
        .await
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<User>, GiftExchangeError> {
        let raw = present(Some(email), RequestField::Email)?;
        let email = parse_email(raw, RequestField::Email)?;
        Ok(self.store.find_one(&UserFilter::Email(email)).await?)
    }
}

#[async_trait]
impl<S> GiftExchangeCommand for GiftExchangeService<S>
where
    S: UserDocumentStore,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, GiftExchangeError> {
        let raw = present(request.email.as_deref(), RequestField::Email)?;
        let email = parse_email(raw, RequestField::Email)?;

        let taken = || GiftExchangeError::conflict(EntityKind::User, ConflictReason::EmailTaken);
        if self
            .store
            .find_one(&UserFilter::Email(email.clone()))
            .await?
            .is_some()
        {
            return Err(taken());
        }

        let user = self
            .store
            .insert(NewUser { email })
            .await
            .map_err(|err| match err {
                UserDocumentStoreError::DuplicateEmail { .. } => taken(),
                other => other.into(),
            })?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn delete_user(&self, request: DeleteUserRequest) -> Result<u64, GiftExchangeError> {
        let user_id: UserId = parse_id(request.user_id.as_deref(), RequestField::UserId)?;
        let removed = self.store.delete_where(&UserFilter::Id(user_id)).await?;
        info!(%user_id, removed, "user delete processed");
        Ok(removed)
    }

    async fn add_gift_exchange(
        &self,
        request: AddGiftExchangeRequest,
    ) -> Result<User, GiftExchangeError> {
        present(request.user_id.as_deref(), RequestField::UserId)?;
        let name = present(request.name.as_deref(), RequestField::Name)?;
        let user_id: UserId = parse_id(request.user_id.as_deref(), RequestField::UserId)?;

        let user = self
            .modify_and_save(&user_id, |user| {
                if user.has_gift_exchange_named(name, None) {
                    return Err(GiftExchangeError::conflict(
                        EntityKind::GiftExchange,
                        ConflictReason::NameTaken,
                    ));
                }
                user.gift_exchanges.push(GiftExchange::new(name));
                Ok(true)
            })
            .await?;
        info!(%user_id, "gift exchange added");
        Ok(user)
    }

    async fn rename_gift_exchange(
        &self,
        request: RenameGiftExchangeRequest,
    ) -> Result<UpdateCounts, GiftExchangeError> {
        request.exchange.check_present()?;
        let new_name = present(request.new_name.as_deref(), RequestField::NewName)?;
        let path = request.exchange.parse()?;

        let user = self.load_user(&path.user_id).await?;
        find_exchange(&user, &path.gift_exchange_id)?;
        if user.has_gift_exchange_named(new_name, Some(&path.gift_exchange_id)) {
            return Err(GiftExchangeError::conflict(
                EntityKind::GiftExchange,
                ConflictReason::NameTaken,
            ));
        }

        self.update_in_place(
            &path.user_id,
            &NestedSelector::GiftExchange {
                gift_exchange_id: path.gift_exchange_id,
            },
            &TargetedUpdate::RenameGiftExchange {
                name: new_name.to_owned(),
            },
            (EntityKind::GiftExchange, path.gift_exchange_id.to_string()),
        )
        .await
    }

    async fn delete_gift_exchange(
        &self,
        request: ExchangeLocator,
    ) -> Result<User, GiftExchangeError> {
        request.check_present()?;
        let path = request.parse()?;

        let user = self
            .modify_and_save(&path.user_id, |user| {
                user.remove_gift_exchange(&path.gift_exchange_id)
                    .ok_or_else(|| {
                        GiftExchangeError::not_found(
                            EntityKind::GiftExchange,
                            path.gift_exchange_id,
                        )
                    })?;
                Ok(true)
            })
            .await?;
        info!(user_id = %path.user_id, gift_exchange_id = %path.gift_exchange_id, "gift exchange deleted");
        Ok(user)
    }

    async fn add_drawing(&self, request: AddDrawingRequest) -> Result<User, GiftExchangeError> {
        request.exchange.check_present()?;
        let year = request
            .year
            .filter(|year| *year != 0)
            .ok_or_else(|| GiftExchangeError::missing_field(RequestField::DrawingYear))?;
        let path = request.exchange.parse()?;
        let year = parse_year(year)?;

        let mut added = false;
        let user = self
            .modify_and_save(&path.user_id, |user| {
                let exchange = exchange_mut(user, &path.gift_exchange_id)?;
                added = !exchange.has_draw_for_year(year);
                if added {
                    exchange.draws.push(Draw::new(year));
                }
                Ok(added)
            })
            .await?;
        if added {
            info!(gift_exchange_id = %path.gift_exchange_id, year, "drawing added");
        } else {
            debug!(gift_exchange_id = %path.gift_exchange_id, year, "drawing already exists");
        }
        Ok(user)
    }

    async fn delete_drawing(&self, request: DrawingLocator) -> Result<User, GiftExchangeError> {
        request.check_present()?;
        let path = request.parse()?;

        let user = self
            .modify_and_save(&path.user_id, |user| {
                exchange_mut(user, &path.gift_exchange_id)?
                    .remove_draw(&path.draw_id)
                    .ok_or_else(|| GiftExchangeError::not_found(EntityKind::Drawing, path.draw_id))?;
                Ok(true)
            })
            .await?;
        info!(user_id = %path.user_id, draw_id = %path.draw_id, "drawing deleted");
        Ok(user)
    }

    async fn add_participant(
        &self,
        request: AddParticipantRequest,
    ) -> Result<User, GiftExchangeError> {
        request.drawing.check_present()?;
        let input = request
            .participant
            .as_ref()
            .ok_or_else(|| GiftExchangeError::missing_field(RequestField::NewParticipant))?;
        let name = present(input.name.as_deref(), RequestField::ParticipantName)?;
        let path = request.drawing.parse()?;
        let email = parse_optional_email(input.email.as_deref(), RequestField::ParticipantEmail)?;

        let mut added = false;
        let user = self
            .modify_and_save(&path.user_id, |user| {
                let draw = draw_mut(user, &path.gift_exchange_id, &path.draw_id)?;
                added = !draw.has_participant_named(name, None);
                if added {
                    draw.participants.push(Participant::new(name, email.clone()));
                }
                Ok(added)
            })
            .await?;
        if added {
            info!(draw_id = %path.draw_id, "participant added");
        } else {
            debug!(draw_id = %path.draw_id, "participant already exists");
        }
        Ok(user)
    }

    async fn delete_participant(
        &self,
        request: ParticipantLocator,
    ) -> Result<User, GiftExchangeError> {
        request.check_present()?;
        let path = request.parse()?;

        let user = self
            .modify_and_save(&path.user_id, |user| {
                draw_mut(user, &path.gift_exchange_id, &path.draw_id)?
                    .remove_participant(&path.participant_id)
                    .ok_or_else(|| {
                        GiftExchangeError::not_found(EntityKind::Participant, path.participant_id)
                    })?;
                Ok(true)
            })
            .await?;
        info!(draw_id = %path.draw_id, participant_id = %path.participant_id, "participant deleted");
        Ok(user)
    }

    async fn update_participant(
        &self,
        request: UpdateParticipantRequest,
    ) -> Result<UpdateCounts, GiftExchangeError> {
        request.participant.check_present()?;
        let updates = request
            .updates
            .as_ref()
            .filter(|updates| {
                updates.name.is_some() || updates.email.is_some() || updates.secret_draw.is_some()
            })
            .ok_or_else(|| GiftExchangeError::missing_field(RequestField::Updates))?;
        let path = request.participant.parse()?;

        let name = match updates.name.as_deref() {
            Some(name) if name.trim().is_empty() => {
                return Err(GiftExchangeError::validation(
                    RequestField::UpdatedName,
                    "name must not be empty",
                ));
            }
            other => other.map(str::to_owned),
        };
        let email = match &updates.email {
            Some(value) => Some(parse_optional_email(
                value.as_deref(),
                RequestField::UpdatedEmail,
            )?),
            None => None,
        };
        let secret_draw = updates
            .secret_draw
            .as_ref()
            .map(|value| value.clone().unwrap_or_default());
        let patch = ParticipantPatch {
            name,
            email,
            secret_draw,
        };

        let user = self.load_user(&path.user_id).await?;
        find_participant(&user, &path)?;
        if let Some(name) = patch.name.as_deref()
            && find_draw(&user, &path)?.has_participant_named(name, Some(&path.participant_id))
        {
            return Err(GiftExchangeError::conflict(
                EntityKind::Participant,
                ConflictReason::NameTaken,
            ));
        }

        self.update_in_place(
            &path.user_id,
            &path.selector(),
            &TargetedUpdate::SetParticipantFields(patch),
            (EntityKind::Participant, path.participant_id.to_string()),
        )
        .await
    }

    async fn add_restriction(
        &self,
        request: RestrictionRequest,
    ) -> Result<UpdateCounts, GiftExchangeError> {
        self.edit_restriction(request, |name| TargetedUpdate::AddRestriction { name })
            .await
    }

    async fn delete_restriction(
        &self,
        request: RestrictionRequest,
    ) -> Result<UpdateCounts, GiftExchangeError> {
        self.edit_restriction(request, |name| TargetedUpdate::PullRestriction { name })
            .await
    }
}

#[async_trait]
impl<S> UserDirectoryQuery for GiftExchangeService<S>
where
    S: UserDocumentStore,
{
    async fn find_user_by_email(&self, email: &str) -> Result<User, GiftExchangeError> {
        self.lookup_by_email(email)
            .await?
            .ok_or_else(|| GiftExchangeError::not_found(EntityKind::User, email))
    }

    async fn user_exists(&self, email: &str) -> Result<bool, GiftExchangeError> {
        Ok(self.lookup_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
#[path = "gift_exchange_service_tests.rs"]
mod tests;
