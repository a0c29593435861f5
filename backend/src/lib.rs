//! Gift exchange backend.
//!
//! A user owns gift exchanges; each exchange holds yearly drawings; each
//! drawing holds participants with their secret draw and restrictions. The
//! whole tree is stored as one document per user.
//!
//! - [`domain`]: entities, ports and the service enforcing the tree's
//!   invariants.
//! - [`inbound`]: the actix-web REST adapter.
//! - [`outbound`]: in-memory and PostgreSQL document stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
