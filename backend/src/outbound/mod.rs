//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **memory**: process-local record store backing both driven ports
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
