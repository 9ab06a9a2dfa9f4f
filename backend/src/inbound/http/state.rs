//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DemoRequestCommand, DemoRequestQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Accepts submissions.
    pub demo_requests: Arc<dyn DemoRequestCommand>,
    /// Reads stored requests.
    pub demo_requests_query: Arc<dyn DemoRequestQuery>,
}

impl HttpState {
    /// Construct state from the intake ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use goloyal::domain::DemoRequestService;
    /// use goloyal::inbound::http::state::HttpState;
    /// use goloyal::outbound::memory::InMemoryStore;
    ///
    /// let service = Arc::new(DemoRequestService::new(Arc::new(InMemoryStore::default())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.demo_requests_query.clone();
    /// ```
    pub fn new(
        demo_requests: Arc<dyn DemoRequestCommand>,
        demo_requests_query: Arc<dyn DemoRequestQuery>,
    ) -> Self {
        Self {
            demo_requests,
            demo_requests_query,
        }
    }
}
