//! Driving port for submitting demo requests.
//!
//! Inbound adapters hand over the raw submission; the implementation
//! validates it in full before anything is stored.

use async_trait::async_trait;

use crate::domain::{DemoRequest, DemoRequestDraft, Error};

/// Use-case port for the demo request intake path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoRequestCommand: Send + Sync {
    /// Validate and store a submission.
    ///
    /// Validation failures are reported as [`crate::domain::ErrorCode::InvalidRequest`]
    /// with one `details.errors` entry per failing field. Nothing is stored
    /// when validation fails.
    async fn submit(&self, draft: DemoRequestDraft) -> Result<DemoRequest, Error>;
}
