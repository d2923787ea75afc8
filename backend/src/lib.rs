//! Ranked event board library.
//!
//! Hexagonal layout: [`domain`] holds entities, services and ports,
//! [`inbound`] the HTTP adapter, [`outbound`] the in-memory and PostgreSQL
//! stores, and [`middleware`] the request tracing layer.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
