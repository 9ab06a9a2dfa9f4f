//! `DemoRequestRepository` implementation for the in-memory store.

use async_trait::async_trait;
use tracing::debug;

use super::{InMemoryStore, read, write};
use crate::domain::ports::{DemoRequestRepository, DemoRequestRepositoryError};
use crate::domain::{DemoRequest, DemoRequestId, NewDemoRequest};

#[async_trait]
impl DemoRequestRepository for InMemoryStore {
    async fn create(
        &self,
        request: NewDemoRequest,
    ) -> Result<DemoRequest, DemoRequestRepositoryError> {
        let mut table = write(&self.demo_requests).map_err(DemoRequestRepositoryError::query)?;
        let mut id = DemoRequestId::random();
        while table.contains(&id) {
            id = DemoRequestId::random();
        }
        let record = DemoRequest::new(id, request, self.clock.utc());
        table.push(id, record.clone());
        debug!(demo_request_id = %id, stored = table.rows.len(), "demo request stored");
        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: &DemoRequestId,
    ) -> Result<Option<DemoRequest>, DemoRequestRepositoryError> {
        let table = read(&self.demo_requests).map_err(DemoRequestRepositoryError::query)?;
        Ok(table.get(id).cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<DemoRequest>, DemoRequestRepositoryError> {
        let table = read(&self.demo_requests).map_err(DemoRequestRepositoryError::query)?;
        // Reverse first so the stable sort leaves equal timestamps in
        // newest-inserted-first order.
        let mut records: Vec<DemoRequest> = table.rows.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }
}
