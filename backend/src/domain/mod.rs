//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed demo request and user entities, the
//! validation rules that guard intake, and the ports adapters plug into.
//! Types are immutable once built; invariants live in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - DemoRequestDraft / DemoRequest: intake submission and stored record.
//! - User / NewUser: minimal user identity kept by the record store.
//! - DemoRequestService: implementation of the intake driving ports.

pub mod demo_request;
pub mod demo_request_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::demo_request::{
    BusinessName, ContactName, DemoRequest, DemoRequestDraft, DemoRequestField, DemoRequestId,
    DemoRequestValidationError, DraftValue, EmailAddress, FieldViolation, NewDemoRequest,
    PhoneNumber, ViolationCode,
};
pub use self::demo_request_service::DemoRequestService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use goloyal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
