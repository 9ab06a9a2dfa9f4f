//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the demo request and health endpoints together with
//! the JSON bodies they exchange. The generated document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`
//! for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::demo_requests::{
    DemoRequestBody, DemoRequestListResponse, DemoRequestPayload, SubmitDemoRequestResponse,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::{ReadinessReport, ReadinessStatus};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GoLoyal backend API",
        description = "Demo request intake for the GoLoyal marketing site, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::demo_requests::submit_demo_request,
        crate::inbound::http::demo_requests::list_demo_requests,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DemoRequestPayload,
        SubmitDemoRequestResponse,
        DemoRequestBody,
        DemoRequestListResponse,
        ErrorEnvelope,
        ReadinessReport,
        ReadinessStatus,
    )),
    tags(
        (name = "demo-requests", description = "Prospect demo request intake"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
