//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into the JSON failure envelope used by
//! every endpoint:
//!
//! ```json
//! { "success": false, "message": "...", "code": "...", "traceId": "...", "errors": [...] }
//! ```
//!
//! `errors` is only present for validation failures. The underlying cause of
//! an internal error is never written by [`ResponseError::error_response`];
//! [`disclose_internal_detail`] re-renders 500 responses with a `detail`
//! field when the server runs in development mode.

use actix_web::body::EitherBody;
use actix_web::dev::ServiceResponse;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message used for malformed request bodies.
pub const INVALID_BODY_MESSAGE: &str = "Validation error";

/// Failure envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Human-readable summary.
    #[schema(example = "Validation error")]
    pub message: String,
    /// Stable machine-readable failure category.
    #[schema(example = "invalid_request")]
    pub code: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// One entry per failing field.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub errors: Option<Vec<Value>>,
    /// Underlying cause of an internal error. Development mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    fn from_error(error: &Error) -> Self {
        let errors = error
            .details()
            .and_then(|details| details.get("errors"))
            .and_then(Value::as_array)
            .cloned();
        Self {
            success: false,
            message: error.message().to_owned(),
            code: error.code().as_str().to_owned(),
            trace_id: error.trace_id().map(|id| id.to_string()),
            errors,
            detail: None,
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render(error: &Error, envelope: &ErrorEnvelope) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for(error.code()));
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_string()));
    }
    builder.json(envelope)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                code = self.code().as_str(),
                message = self.message(),
                cause = self.internal_detail().unwrap_or("unrecorded"),
                trace_id = ?self.trace_id().map(|id| id.to_string()),
                "internal error returned to client"
            );
        }
        render(self, &ErrorEnvelope::from_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error").with_internal_detail(err.to_string())
    }
}

/// Build the error returned for a request body that is not a JSON object.
pub fn invalid_body_error(reason: impl std::fmt::Display) -> Error {
    let reason = reason.to_string();
    warn!(%reason, "request body rejected");
    Error::invalid_request(INVALID_BODY_MESSAGE).with_details(json!({
        "errors": [{
            "field": "body",
            "path": [],
            "message": format!("request body must be a JSON object: {reason}"),
            "code": "invalid_body",
        }]
    }))
}

/// JSON extractor error handler mapping malformed payloads to the envelope.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    invalid_body_error(err).into()
}

/// `ErrorHandlers` hook adding `detail` to 500 responses raised by a domain
/// [`Error`] that recorded an internal cause.
///
/// Installed only in development mode.
pub fn disclose_internal_detail<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let disclosed = res
        .response()
        .error()
        .and_then(|err| err.as_error::<Error>())
        .and_then(|domain| {
            domain.internal_detail().map(|detail| {
                let mut envelope = ErrorEnvelope::from_error(domain);
                envelope.detail = Some(detail.to_owned());
                render(domain, &envelope)
            })
        });

    let res: ServiceResponse<EitherBody<B>> = match disclosed {
        Some(mut response) => {
            let trace_header = res.headers().get(TRACE_ID_HEADER).cloned();
            if let Some(value) = trace_header {
                response.headers_mut().insert(
                    actix_web::http::header::HeaderName::from_static(TRACE_ID_HEADER),
                    value,
                );
            }
            let (req, _) = res.into_parts();
            ServiceResponse::new(req, response).map_into_right_body()
        }
        None => res.map_into_left_body(),
    };
    Ok(ErrorHandlerResponse::Response(res))
}
