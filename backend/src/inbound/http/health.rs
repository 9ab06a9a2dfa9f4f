//! Readiness and liveness endpoints.
//!
//! Readiness requires a bound listener and a healthy record store. A missing
//! frontend build is reported but does not hold traffic back, since the API
//! still works without it. Liveness only says the worker is answering.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::DependencyHealth;

/// Readiness inputs shared by every worker.
pub struct HealthState {
    listening: AtomicBool,
    store: Arc<dyn DependencyHealth>,
    frontend_available: bool,
}

impl HealthState {
    /// Track `store` and whether the frontend build was found at startup.
    pub fn new(store: Arc<dyn DependencyHealth>, frontend_available: bool) -> Self {
        Self {
            listening: AtomicBool::new(false),
            store,
            frontend_available,
        }
    }

    /// Record that the listener is bound and accepting connections.
    pub fn mark_listening(&self) {
        self.listening.store(true, Ordering::Release);
    }

    /// Evaluate every check.
    pub fn report(&self) -> ReadinessReport {
        let listening = self.listening.load(Ordering::Acquire);
        let store_healthy = self.store.is_healthy();
        let status = match (listening, store_healthy) {
            (false, _) => ReadinessStatus::Starting,
            (true, false) => ReadinessStatus::Unavailable,
            (true, true) => ReadinessStatus::Ready,
        };

        let mut checks = Map::new();
        checks.insert("listener".to_owned(), Value::Bool(listening));
        checks.insert(self.store.name().to_owned(), Value::Bool(store_healthy));
        checks.insert("frontend".to_owned(), Value::Bool(self.frontend_available));

        ReadinessReport { status, checks }
    }
}

/// Overall readiness outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// Listener not yet bound.
    Starting,
    /// Serving traffic.
    Ready,
    /// A required dependency has failed.
    Unavailable,
}

/// Body of `GET /health/ready`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReadinessReport {
    /// Overall outcome.
    pub status: ReadinessStatus,
    /// Check name to outcome.
    #[schema(value_type = Object)]
    pub checks: Map<String, Value>,
}

impl ReadinessReport {
    /// `true` when traffic should be routed here.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}

fn uncached(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}

/// Readiness check.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Listener bound and record store healthy", body = ReadinessReport),
        (status = 503, description = "Starting up or record store failed", body = ReadinessReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let report = state.report();
    if report.is_ready() {
        uncached(HttpResponse::Ok()).json(report)
    } else {
        if report.status == ReadinessStatus::Unavailable {
            warn!(checks = %serde_json::Value::Object(report.checks.clone()), "readiness check failed");
        }
        uncached(HttpResponse::ServiceUnavailable()).json(report)
    }
}

/// Liveness check. Answers 200 whenever a worker can respond.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Worker is responding"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    uncached(HttpResponse::Ok()).json(serde_json::json!({ "status": "alive" }))
}
