//! Transport-neutral failures raised by domain services.
//!
//! An [`Error`] carries the client-facing message and code. It can also hold
//! structured `details` (per-field validation entries) and an
//! `internal_detail` with the underlying cause. The HTTP adapter decides how
//! much of this to render.

use std::fmt;

use serde_json::Value;

use super::TraceId;

/// Failure category, mapped by adapters onto a protocol status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input failed validation or could not be parsed.
    InvalidRequest,
    /// The addressed resource does not exist.
    NotFound,
    /// A dependency such as the record store failed.
    InternalError,
}

impl ErrorCode {
    /// Wire representation used in response envelopes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
        }
    }

    /// Message substituted when a caller supplies a blank one.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid request",
            Self::NotFound => "Not found",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected input to [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// Message was empty or whitespace.
    #[error("error message must not be blank")]
    EmptyMessage,
}

/// Domain failure.
///
/// The trace identifier of the request in flight, if any, is captured at
/// construction. `internal_detail` is never part of the default rendering.
///
/// ```
/// use goloyal::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("demo request 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.internal_detail().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
    details: Option<Value>,
    internal_detail: Option<String>,
}

impl Error {
    /// Build an error, substituting the code's fallback for a blank message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
            details: None,
            internal_detail: None,
        }
    }

    /// Build an error, refusing a blank message.
    ///
    /// # Errors
    /// [`ErrorValidationError::EmptyMessage`] when `message` is blank.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, message))
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request the error was raised under.
    #[must_use]
    pub const fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Structured payload, e.g. `{"errors": [...]}` for validation failures.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Underlying cause recorded for operators.
    #[must_use]
    pub fn internal_detail(&self) -> Option<&str> {
        self.internal_detail.as_deref()
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub const fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Record the underlying cause.
    #[must_use]
    pub fn with_internal_detail(mut self, detail: impl Into<String>) -> Self {
        self.internal_detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
