//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`DemoRequestCommand`, `DemoRequestQuery`) are called by
//! inbound adapters. Driven ports (`DemoRequestRepository`, `UserRepository`)
//! are implemented by outbound adapters. `DependencyHealth` lets the
//! readiness check ask an adapter whether it can still serve.

mod macros;
pub(crate) use macros::define_port_error;

mod demo_request_command;
mod dependency_health;
mod demo_request_query;
mod demo_request_repository;
mod user_repository;

pub use demo_request_command::DemoRequestCommand;
#[cfg(test)]
pub use demo_request_command::MockDemoRequestCommand;
pub use demo_request_query::DemoRequestQuery;
#[cfg(test)]
pub use dependency_health::MockDependencyHealth;
pub use dependency_health::DependencyHealth;
#[cfg(test)]
pub use demo_request_query::MockDemoRequestQuery;
#[cfg(test)]
pub use demo_request_repository::MockDemoRequestRepository;
pub use demo_request_repository::{DemoRequestRepository, DemoRequestRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
