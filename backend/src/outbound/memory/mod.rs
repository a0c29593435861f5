//! In-process user document store.
//!
//! Holds every document in a map behind a single async lock. Each port call
//! takes the lock once, so targeted updates and revision-checked saves are
//! atomic with respect to one another. Used when no database URL is configured
//! and by the HTTP integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    NestedSelector, TargetedUpdate, UpdateCounts, UserDocumentStore, UserDocumentStoreError,
    UserFilter, apply_targeted_update,
};
use crate::domain::{NewUser, User, UserId};

/// Document store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryUserDocumentStore {
    documents: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl UserDocumentStore for InMemoryUserDocumentStore {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, UserDocumentStoreError> {
        let documents = self.documents.read().await;
        let found = match filter {
            UserFilter::Id(id) => documents.get(id).cloned(),
            UserFilter::Email(_) => documents.values().find(|u| filter.matches(u)).cloned(),
        };
        Ok(found)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, UserDocumentStoreError> {
        let mut documents = self.documents.write().await;
        if documents.values().any(|u| u.email == new_user.email) {
            return Err(UserDocumentStoreError::duplicate_email(new_user.email));
        }
        let user = User::from_new(UserId::random(), new_user);
        documents.insert(user.id, user.clone());
        debug!(user_id = %user.id, "document inserted");
        Ok(user)
    }

    async fn delete_where(&self, filter: &UserFilter) -> Result<u64, UserDocumentStoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, user| !filter.matches(user));
        Ok((before - documents.len()) as u64)
    }

    async fn update_targeted(
        &self,
        user_id: &UserId,
        selector: &NestedSelector,
        update: &TargetedUpdate,
    ) -> Result<UpdateCounts, UserDocumentStoreError> {
        let mut documents = self.documents.write().await;
        let Some(user) = documents.get_mut(user_id) else {
            return Ok(UpdateCounts::UNMATCHED);
        };
        let counts = apply_targeted_update(user, selector, update)?;
        if counts.modified_count > 0 {
            user.revision += 1;
        }
        Ok(counts)
    }

    async fn save(&self, user: &User) -> Result<User, UserDocumentStoreError> {
        let mut documents = self.documents.write().await;
        let Some(stored) = documents.get_mut(&user.id) else {
            return Err(UserDocumentStoreError::revision_mismatch(user.revision, 0_u32));
        };
        if stored.revision != user.revision {
            return Err(UserDocumentStoreError::revision_mismatch(
                user.revision,
                stored.revision,
            ));
        }
        let mut saved = user.clone();
        saved.revision += 1;
        *stored = saved.clone();
        Ok(saved)
    }
}
