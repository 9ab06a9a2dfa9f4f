//! Server construction and middleware wiring.
//!
//! The binary reads [`ServerSettings`] from the environment and hands them to
//! [`create_server`]. Integration tests drive the same [`build_app`] so the
//! routes they exercise are the ones that ship.

pub mod settings;

pub use settings::{RuntimeMode, ServerSettings, SettingsError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::{Condition, ErrorHandlers};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::DemoRequestService;
use crate::inbound::http::demo_requests::{json_config, list_demo_requests, submit_demo_request};
use crate::inbound::http::error::disclose_internal_detail;
use crate::inbound::http::frontend::{FrontendAssets, serve_frontend};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Everything a worker needs to build its `App`.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness inputs.
    pub health_state: web::Data<HealthState>,
    /// Driving ports used by the API handlers.
    pub http_state: web::Data<HttpState>,
    /// Built frontend, if present.
    pub frontend: web::Data<FrontendAssets>,
    /// Controls disclosure of internal error detail.
    pub runtime_mode: RuntimeMode,
}

/// Wire the intake service over a shared record store.
pub fn build_http_state(store: Arc<InMemoryStore>) -> HttpState {
    let service = Arc::new(DemoRequestService::new(store));
    HttpState::new(service.clone(), service)
}

/// Assemble routes and middleware.
///
/// Trace wraps everything, so every response, including those rewritten by
/// the development error handler, carries a `trace-id` header.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        frontend,
        runtime_mode,
    } = deps;

    let api = web::scope("/api")
        .app_data(json_config())
        .service(submit_demo_request)
        .service(list_demo_requests);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(frontend)
        .wrap(Condition::new(
            runtime_mode.is_development(),
            ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, disclose_internal_detail),
        ))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(serve_frontend))
}

/// Bind an Actix HTTP server for `settings`.
///
/// Returns the server, which must be awaited to drive the listener, and the
/// address actually bound (useful when `settings.port` is `0`). The listener
/// check of the readiness check passes once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(settings: &ServerSettings) -> std::io::Result<(Server, SocketAddr)> {
    let store = Arc::new(InMemoryStore::default());
    let assets = FrontendAssets::open(&settings.static_dir);
    let health_state = web::Data::new(HealthState::new(store.clone(), assets.is_available()));
    let http_state = web::Data::new(build_http_state(store));
    let frontend = web::Data::new(assets);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        frontend,
        runtime_mode: settings.runtime_mode,
    };

    let server = HttpServer::new(move || build_app(deps.clone())).bind(settings.bind_addr())?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| std::io::Error::other("server bound no addresses"))?;
    let server = server.run();

    health_state.mark_listening();
    info!(
        %addr,
        runtime_mode = %settings.runtime_mode,
        static_dir = %settings.static_dir.display(),
        "server listening"
    );
    Ok((server, addr))
}
