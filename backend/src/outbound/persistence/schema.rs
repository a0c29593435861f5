//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// One row per user; the nested gift exchange tree lives in `document`.
    user_documents (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Registration email, unique across users.
        email -> Text,
        /// Serialised user document.
        document -> Jsonb,
        /// Write counter used for optimistic concurrency.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
