//! Driving port for reading demo requests.

use async_trait::async_trait;

use crate::domain::{DemoRequest, DemoRequestId, Error};

/// Use-case port for listing and fetching demo requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoRequestQuery: Send + Sync {
    /// Every demo request, newest first.
    async fn list(&self) -> Result<Vec<DemoRequest>, Error>;

    /// One demo request, or [`crate::domain::ErrorCode::NotFound`].
    async fn get(&self, id: &DemoRequestId) -> Result<DemoRequest, Error>;
}
