//! Outbound adapters implementing domain ports for storage.
//!
//! - **memory**: process-local document store, used when no database is
//!   configured and in tests
//! - **persistence**: PostgreSQL-backed document store using Diesel ORM
//!
//! Adapters translate between domain documents and storage representations.
//! They contain no business logic.

pub mod memory;
pub mod persistence;
