//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides [`DieselUserDocumentStore`], the durable implementation of the
//! domain's user document store port, plus pool and migration plumbing.
//!
//! # Architecture
//!
//! - **Thin adapter**: rows are translated to and from domain documents; the
//!   nested update rules live in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Async-safe pooling**: connections come from a `bb8` pool through
//!   `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use gift_exchange_backend::outbound::persistence::{
//!     DbPool, DieselUserDocumentStore, PoolConfig, run_pending_migrations,
//! };
//!
//! run_pending_migrations("postgres://localhost/gifts").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/gifts")).await?;
//! let store = DieselUserDocumentStore::new(pool);
//! ```

mod diesel_user_document_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_document_store::DieselUserDocumentStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
