//! GoLoyal backend library modules.
//!
//! Hexagonal layout: `domain` owns the demo request model and ports,
//! `inbound` adapts HTTP onto the driving ports, `outbound` implements the
//! driven ports, and `server` wires them into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
