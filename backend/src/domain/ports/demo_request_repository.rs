//! Driven port for demo request storage.
//!
//! The store owns identity and timestamps: callers hand over a validated
//! [`NewDemoRequest`] and receive the stored [`DemoRequest`] back.

use async_trait::async_trait;

use crate::domain::{DemoRequest, DemoRequestId, NewDemoRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by demo request repository adapters.
    pub enum DemoRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "demo request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "demo request repository query failed: {message}",
    }
}

/// Port for creating and reading demo requests.
///
/// Records are insert-only: there is no update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoRequestRepository: Send + Sync {
    /// Assign a fresh identifier and creation timestamp, then store the record.
    async fn create(
        &self,
        request: NewDemoRequest,
    ) -> Result<DemoRequest, DemoRequestRepositoryError>;

    /// Fetch one record. `Ok(None)` signals "not found".
    async fn find_by_id(
        &self,
        id: &DemoRequestId,
    ) -> Result<Option<DemoRequest>, DemoRequestRepositoryError>;

    /// Every stored record, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<DemoRequest>, DemoRequestRepositoryError>;
}
