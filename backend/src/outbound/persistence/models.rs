//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::user_documents;

/// Row read from `user_documents`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserDocumentRow {
    pub id: Uuid,
    #[expect(dead_code, reason = "email is also carried inside the document")]
    pub email: String,
    pub document: serde_json::Value,
    pub revision: i32,
    #[expect(dead_code, reason = "audit column, not surfaced to the domain")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "audit column, not surfaced to the domain")]
    pub updated_at: DateTime<Utc>,
}

/// Row written when a user registers.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_documents)]
pub(crate) struct NewUserDocumentRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub document: &'a serde_json::Value,
    pub revision: i32,
}
