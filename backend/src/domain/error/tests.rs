//! Tests for domain error construction.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn trace_id() -> TraceId {
    "3b0f5a52-9d1e-4c0a-8f6e-1d2c3b4a5f60".parse().expect("valid uuid")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, "invalid_request")]
#[case(Error::not_found("missing"), ErrorCode::NotFound, "not_found")]
#[case(Error::internal("boom"), ErrorCode::InternalError, "internal_error")]
fn constructors_set_codes(#[case] error: Error, #[case] code: ErrorCode, #[case] wire: &str) {
    assert_eq!(error.code(), code);
    assert_eq!(error.code().as_str(), wire);
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "Invalid request")]
#[case(ErrorCode::NotFound, "Not found")]
#[case(ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_per_code(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(Error::new(code, "  ").message(), expected);
}

#[rstest]
fn try_new_refuses_blank_messages() {
    assert_eq!(
        Error::try_new(ErrorCode::NotFound, "\t"),
        Err(ErrorValidationError::EmptyMessage)
    );
}

#[rstest]
fn no_trace_id_outside_a_request() {
    assert_eq!(Error::internal("boom").trace_id(), None);
}

#[rstest]
#[tokio::test]
async fn captures_the_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(trace_id));
}

#[rstest]
fn builders_attach_details_and_cause(trace_id: TraceId) {
    let error = Error::internal("Failed to submit demo request")
        .with_trace_id(trace_id)
        .with_details(json!({ "errors": [] }))
        .with_internal_detail("store lock poisoned");

    assert_eq!(error.trace_id(), Some(trace_id));
    assert_eq!(error.details(), Some(&json!({ "errors": [] })));
    assert_eq!(error.internal_detail(), Some("store lock poisoned"));
}

#[rstest]
fn display_omits_the_internal_cause() {
    let error = Error::internal("Failed to retrieve demo requests").with_internal_detail("disk full");

    assert_eq!(error.to_string(), "internal_error: Failed to retrieve demo requests");
}
