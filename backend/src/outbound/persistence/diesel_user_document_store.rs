//! PostgreSQL-backed `UserDocumentStore` implementation using Diesel.
//!
//! Each user is one row whose `document` column holds the serialised tree.
//! Targeted updates lock the row, apply the change with the shared
//! [`apply_targeted_update`] routine and write it back inside one
//! transaction. Whole-document saves are conditional on the stored revision.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    NestedSelector, TargetedUpdate, UpdateCounts, UserDocumentStore, UserDocumentStoreError,
    UserFilter, apply_targeted_update,
};
use crate::domain::{NewUser, User, UserId};

use super::models::{NewUserDocumentRow, UserDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_documents;

/// Diesel-backed implementation of the `UserDocumentStore` port.
#[derive(Clone)]
pub struct DieselUserDocumentStore {
    pool: DbPool,
}

impl DieselUserDocumentStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDocumentStoreError {
    UserDocumentStoreError::connection(error.message())
}

fn map_diesel_error(error: DieselError) -> UserDocumentStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserDocumentStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserDocumentStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserDocumentStoreError::connection("database connection error")
        }
        _ => UserDocumentStoreError::query("database error"),
    }
}

fn map_insert_error(error: DieselError, email: &str) -> UserDocumentStoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserDocumentStoreError::duplicate_email(email)
        }
        other => map_diesel_error(other),
    }
}

fn to_db_revision(revision: u32) -> Result<i32, UserDocumentStoreError> {
    i32::try_from(revision)
        .map_err(|_| UserDocumentStoreError::query(format!("revision {revision} out of range")))
}

fn to_document(user: &User) -> Result<serde_json::Value, UserDocumentStoreError> {
    serde_json::to_value(user)
        .map_err(|err| UserDocumentStoreError::query(format!("failed to serialise user: {err}")))
}

fn row_to_user(row: UserDocumentRow) -> Result<User, UserDocumentStoreError> {
    let mut user: User = serde_json::from_value(row.document).map_err(|err| {
        UserDocumentStoreError::query(format!("stored document {} is malformed: {err}", row.id))
    })?;
    user.id = UserId::from_uuid(row.id);
    user.revision = u32::try_from(row.revision).map_err(|_| {
        UserDocumentStoreError::query(format!("stored revision {} is negative", row.revision))
    })?;
    Ok(user)
}

fn filtered(filter: &UserFilter) -> user_documents::BoxedQuery<'_, Pg> {
    let query = user_documents::table.into_boxed();
    match filter {
        UserFilter::Id(id) => query.filter(user_documents::id.eq(*id.as_uuid())),
        UserFilter::Email(email) => query.filter(user_documents::email.eq(email.as_ref())),
    }
}

/// Failure inside the targeted update transaction.
enum TransactionError {
    Diesel(DieselError),
    Store(UserDocumentStoreError),
}

impl From<DieselError> for TransactionError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<UserDocumentStoreError> for TransactionError {
    fn from(error: UserDocumentStoreError) -> Self {
        Self::Store(error)
    }
}

impl From<TransactionError> for UserDocumentStoreError {
    fn from(error: TransactionError) -> Self {
        match error {
            TransactionError::Diesel(err) => map_diesel_error(err),
            TransactionError::Store(err) => err,
        }
    }
}

#[async_trait]
impl UserDocumentStore for DieselUserDocumentStore {
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<User>, UserDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserDocumentRow> = filtered(filter)
            .select(UserDocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, UserDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user = User::from_new(UserId::from_uuid(Uuid::new_v4()), new_user);
        let document = to_document(&user)?;
        let row = NewUserDocumentRow {
            id: *user.id.as_uuid(),
            email: user.email.as_ref(),
            document: &document,
            revision: to_db_revision(user.revision)?,
        };

        diesel::insert_into(user_documents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, user.email.as_ref()))?;

        Ok(user)
    }

    async fn delete_where(&self, filter: &UserFilter) -> Result<u64, UserDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = match filter {
            UserFilter::Id(id) => {
                diesel::delete(user_documents::table.filter(user_documents::id.eq(*id.as_uuid())))
                    .execute(&mut conn)
                    .await
            }
            UserFilter::Email(email) => diesel::delete(
                user_documents::table.filter(user_documents::email.eq(email.as_ref())),
            )
            .execute(&mut conn)
            .await,
        }
        .map_err(map_diesel_error)?;

        Ok(removed as u64)
    }

    async fn update_targeted(
        &self,
        user_id: &UserId,
        selector: &NestedSelector,
        update: &TargetedUpdate,
    ) -> Result<UpdateCounts, UserDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *user_id.as_uuid();

        let counts = conn
            .transaction::<_, TransactionError, _>(|conn| {
                async move {
                    let row: Option<UserDocumentRow> = user_documents::table
                        .filter(user_documents::id.eq(id))
                        .select(UserDocumentRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(UpdateCounts::UNMATCHED);
                    };

                    let mut user = row_to_user(row)?;
                    let counts = apply_targeted_update(&mut user, selector, update)?;
                    if counts.modified_count == 0 {
                        return Ok(counts);
                    }

                    let document = to_document(&user)?;
                    diesel::update(user_documents::table.filter(user_documents::id.eq(id)))
                        .set((
                            user_documents::document.eq(&document),
                            user_documents::revision.eq(user_documents::revision + 1),
                            user_documents::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .await?;
                    Ok(counts)
                }
                .scope_boxed()
            })
            .await?;

        Ok(counts)
    }

    async fn save(&self, user: &User) -> Result<User, UserDocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let expected = to_db_revision(user.revision)?;
        let next = to_db_revision(user.revision.saturating_add(1))?;
        let document = to_document(user)?;

        let updated = diesel::update(
            user_documents::table
                .filter(user_documents::id.eq(user.id.as_uuid()))
                .filter(user_documents::revision.eq(expected)),
        )
        .set((
            user_documents::document.eq(&document),
            user_documents::revision.eq(next),
            user_documents::updated_at.eq(now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        if updated == 0 {
            let actual: Option<i32> = user_documents::table
                .filter(user_documents::id.eq(user.id.as_uuid()))
                .select(user_documents::revision)
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            let actual = actual.and_then(|r| u32::try_from(r).ok()).unwrap_or(0);
            return Err(UserDocumentStoreError::revision_mismatch(
                user.revision,
                actual,
            ));
        }

        let mut saved = user.clone();
        saved.revision += 1;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn unique_violations_on_insert_become_duplicate_email() {
        let error = map_insert_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value".to_owned()),
            ),
            "a@example.com",
        );

        assert_eq!(
            error,
            UserDocumentStoreError::duplicate_email("a@example.com")
        );
    }

    #[rstest]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, Box::new("gone".to_owned())),
        UserDocumentStoreError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, UserDocumentStoreError::query("record not found"))]
    #[case(DieselError::RollbackTransaction, UserDocumentStoreError::query("database error"))]
    fn diesel_errors_are_classified(
        #[case] error: DieselError,
        #[case] expected: UserDocumentStoreError,
    ) {
        assert_eq!(map_diesel_error(error), expected);
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, UserDocumentStoreError::connection("timed out"));
    }

    #[rstest]
    fn rows_take_identity_and_revision_from_their_columns() {
        let email = EmailAddress::new("a@example.com").expect("valid email");
        let user = User::from_new(UserId::random(), NewUser { email });
        let id = Uuid::new_v4();
        let row = UserDocumentRow {
            id,
            email: "a@example.com".to_owned(),
            document: to_document(&user).expect("serialises"),
            revision: 7,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let decoded = row_to_user(row).expect("row decodes");

        assert_eq!(decoded.id, UserId::from_uuid(id));
        assert_eq!(decoded.revision, 7);
    }

    #[rstest]
    fn malformed_documents_are_query_errors() {
        let row = UserDocumentRow {
            id: Uuid::new_v4(),
            email: "a@example.com".to_owned(),
            document: json!({ "unexpected": true }),
            revision: 1,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert!(matches!(
            row_to_user(row),
            Err(UserDocumentStoreError::Query { .. })
        ));
    }
}
