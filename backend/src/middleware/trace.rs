//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each incoming request receives a UUID `trace_id` stored in task-local
//! storage for correlation across logs and error responses. Requests under
//! `/api` are additionally logged on completion with their status, latency,
//! client address and a truncated `User-Agent`.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when spawning new tasks or moving work onto blocking
//! threads to ensure the active trace identifier propagates correctly.

use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

const API_PREFIX: &str = "/api";
const SLOW_REQUEST: Duration = Duration::from_secs(1);
const USER_AGENT_LOG_CHARS: usize = 100;

/// Tracing middleware attaching a request-scoped UUID and
/// adding a `trace-id` header to every response.
///
/// Handlers can read the trace ID via [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use goloyal::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
///
/// Applications should not use this type directly.
pub struct TraceMiddleware<S> {
    service: S,
}

/// Request line and client details captured before the request is handed on.
struct ApiRequest {
    method: String,
    path: String,
    client_ip: Option<String>,
    user_agent: Option<String>,
    started: Instant,
}

impl ApiRequest {
    fn capture(req: &ServiceRequest) -> Option<Self> {
        let path = req.path();
        let is_api = path == API_PREFIX || path.starts_with("/api/");
        is_api.then(|| Self {
            method: req.method().to_string(),
            path: path.to_owned(),
            client_ip: req.connection_info().realip_remote_addr().map(str::to_owned),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .map(|agent| agent.chars().take(USER_AGENT_LOG_CHARS).collect()),
            started: Instant::now(),
        })
    }

    fn log_completion(&self, status: StatusCode, trace_id: TraceId) {
        let elapsed = self.started.elapsed();
        let elapsed_ms = elapsed.as_millis();
        let status_code = status.as_u16();
        let method = self.method.as_str();
        let path = self.path.as_str();
        let client_ip = self.client_ip.as_deref().unwrap_or("-");
        let user_agent = self.user_agent.as_deref().unwrap_or("-");

        if status.is_server_error() {
            error!(%trace_id, method, path, status = status_code, elapsed_ms, client_ip, user_agent, "request failed");
        } else if status.is_client_error() {
            warn!(%trace_id, method, path, status = status_code, elapsed_ms, client_ip, user_agent, "request rejected");
        } else {
            info!(%trace_id, method, path, status = status_code, elapsed_ms, client_ip, user_agent, "request completed");
        }

        if elapsed > SLOW_REQUEST {
            warn!(%trace_id, method, path, elapsed_ms, "slow request");
        }
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let header_value = trace_id.to_string();
        let api_request = ApiRequest::capture(&req);
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            if let Some(api_request) = api_request {
                api_request.log_completion(res.status(), trace_id);
            }
            Ok(res)
        }))
    }
}
