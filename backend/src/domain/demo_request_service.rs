//! Demo request domain service.
//!
//! Implements the intake driving ports on top of a [`DemoRequestRepository`].
//! Validation always completes before the repository is touched, so a
//! rejected submission never leaves partial state behind.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::domain::ports::{
    DemoRequestCommand, DemoRequestQuery, DemoRequestRepository, DemoRequestRepositoryError,
};
use crate::domain::{
    DemoRequest, DemoRequestDraft, DemoRequestId, DemoRequestValidationError, Error,
};

/// Summary message returned with field-level validation failures.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation error";
/// Message returned when a submission cannot be stored.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit demo request";
/// Message returned when demo requests cannot be read.
pub const RETRIEVE_FAILED_MESSAGE: &str = "Failed to retrieve demo requests";

/// Demo request service implementing the intake command and query ports.
#[derive(Clone)]
pub struct DemoRequestService<R> {
    repository: Arc<R>,
}

impl<R> DemoRequestService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DemoRequestService<R>
where
    R: DemoRequestRepository,
{
    fn validation_error(rejection: &DemoRequestValidationError) -> Error {
        let errors: Vec<Value> = rejection
            .violations()
            .iter()
            .map(|violation| {
                let field = violation.field().as_str();
                json!({
                    "field": field,
                    "path": [field],
                    "message": violation.message(),
                    "code": violation.code().as_str(),
                })
            })
            .collect();
        Error::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(json!({ "errors": errors }))
    }

    fn repository_error(message: &str, cause: &DemoRequestRepositoryError) -> Error {
        let failure = Error::internal(message).with_internal_detail(cause.to_string());
        error!(
            error = %cause,
            trace_id = ?failure.trace_id().map(|id| id.to_string()),
            "demo request repository failed"
        );
        failure
    }
}

#[async_trait]
impl<R> DemoRequestCommand for DemoRequestService<R>
where
    R: DemoRequestRepository,
{
    async fn submit(&self, draft: DemoRequestDraft) -> Result<DemoRequest, Error> {
        let request = draft.validate().map_err(|rejection| {
            warn!(
                failing_fields = rejection.violations().len(),
                "demo request rejected by validation"
            );
            Self::validation_error(&rejection)
        })?;

        self.repository
            .create(request)
            .await
            .map_err(|cause| Self::repository_error(SUBMIT_FAILED_MESSAGE, &cause))
    }
}

#[async_trait]
impl<R> DemoRequestQuery for DemoRequestService<R>
where
    R: DemoRequestRepository,
{
    async fn list(&self) -> Result<Vec<DemoRequest>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(|cause| Self::repository_error(RETRIEVE_FAILED_MESSAGE, &cause))
    }

    async fn get(&self, id: &DemoRequestId) -> Result<DemoRequest, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|cause| Self::repository_error(RETRIEVE_FAILED_MESSAGE, &cause))?
            .ok_or_else(|| Error::not_found(format!("demo request {id} not found")))
    }
}

#[cfg(test)]
#[path = "demo_request_service_tests.rs"]
mod tests;
