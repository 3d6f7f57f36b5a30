//! Accounts backend: registration and login over a relational store.
//!
//! The crate is laid out as a hexagon. [`domain`] holds the account types,
//! the ports and the account service; [`inbound`] exposes them over HTTP;
//! [`outbound`] implements the store and hashing ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
