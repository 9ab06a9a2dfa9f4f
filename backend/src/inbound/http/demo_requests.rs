//! Demo request API handlers.
//!
//! ```text
//! POST /api/demo-requests {"businessName":"Corner Coffee","contactName":"Ada",...}
//! GET /api/demo-requests
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DemoRequest, DemoRequestDraft, DraftValue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ErrorEnvelope, json_error_handler};
use crate::inbound::http::state::HttpState;

/// Confirmation message for an accepted submission.
pub const SUBMITTED_MESSAGE: &str = "Demo request submitted successfully";

/// Submission body.
///
/// Every field is read as raw JSON so the domain can tell a missing field
/// from one of the wrong type. Only a JSON object is accepted; arrays and
/// scalars fail extraction and surface as `invalid_body`.
#[derive(Debug, Default, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DemoRequestPayload {
    /// Name of the prospect's business.
    #[schema(value_type = String, example = "Corner Coffee")]
    pub business_name: Option<Value>,
    /// Person to contact.
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub contact_name: Option<Value>,
    /// Contact email address.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: Option<Value>,
    /// Contact phone number.
    #[schema(value_type = String, example = "555-0100")]
    pub phone: Option<Value>,
}

impl<'de> Deserialize<'de> for DemoRequestPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `Map` only visits maps, so positional sequences are refused.
        let mut object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            business_name: object.remove("businessName"),
            contact_name: object.remove("contactName"),
            email: object.remove("email"),
            phone: object.remove("phone"),
        })
    }
}

fn draft_value(value: Option<Value>) -> DraftValue {
    match value {
        None | Some(Value::Null) => DraftValue::Missing,
        Some(Value::String(text)) => DraftValue::Text(text),
        Some(_) => DraftValue::NotText,
    }
}

impl From<DemoRequestPayload> for DemoRequestDraft {
    fn from(payload: DemoRequestPayload) -> Self {
        Self {
            business_name: draft_value(payload.business_name),
            contact_name: draft_value(payload.contact_name),
            email: draft_value(payload.email),
            phone: draft_value(payload.phone),
        }
    }
}

/// Body returned once a submission is stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDemoRequestResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    #[schema(example = "Demo request submitted successfully")]
    pub message: String,
    /// Identifier of the stored request.
    pub id: Uuid,
}

/// Stored demo request as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DemoRequestBody {
    /// Identifier assigned at submission.
    pub id: Uuid,
    /// Name of the prospect's business.
    pub business_name: String,
    /// Person to contact.
    pub contact_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Submission time in UTC.
    pub created_at: DateTime<Utc>,
}

impl From<&DemoRequest> for DemoRequestBody {
    fn from(record: &DemoRequest) -> Self {
        Self {
            id: *record.id().as_uuid(),
            business_name: record.business_name().to_string(),
            contact_name: record.contact_name().to_string(),
            email: record.email().to_string(),
            phone: record.phone().to_string(),
            created_at: record.created_at(),
        }
    }
}

/// Body of the list endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DemoRequestListResponse {
    /// Always `true`.
    pub success: bool,
    /// Stored requests, newest first.
    pub data: Vec<DemoRequestBody>,
}

/// JSON extractor configuration for this API.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Submit a demo request.
#[utoipa::path(
    post,
    path = "/api/demo-requests",
    request_body = DemoRequestPayload,
    responses(
        (status = 201, description = "Demo request stored", body = SubmitDemoRequestResponse),
        (status = 400, description = "Validation error", body = ErrorEnvelope),
        (status = 500, description = "Failed to submit demo request", body = ErrorEnvelope)
    ),
    tags = ["demo-requests"],
    operation_id = "submitDemoRequest"
)]
#[post("/demo-requests")]
pub async fn submit_demo_request(
    state: web::Data<HttpState>,
    payload: web::Json<DemoRequestPayload>,
) -> ApiResult<HttpResponse> {
    let draft = DemoRequestDraft::from(payload.into_inner());
    let created = state.demo_requests.submit(draft).await?;
    Ok(HttpResponse::Created().json(SubmitDemoRequestResponse {
        success: true,
        message: SUBMITTED_MESSAGE.to_owned(),
        id: *created.id().as_uuid(),
    }))
}

/// List every demo request, newest first.
#[utoipa::path(
    get,
    path = "/api/demo-requests",
    responses(
        (status = 200, description = "Demo requests", body = DemoRequestListResponse),
        (status = 500, description = "Failed to retrieve demo requests", body = ErrorEnvelope)
    ),
    tags = ["demo-requests"],
    operation_id = "listDemoRequests"
)]
#[get("/demo-requests")]
pub async fn list_demo_requests(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DemoRequestListResponse>> {
    let records = state.demo_requests_query.list().await?;
    Ok(web::Json(DemoRequestListResponse {
        success: true,
        data: records.iter().map(DemoRequestBody::from).collect(),
    }))
}

#[cfg(test)]
#[path = "demo_requests_tests.rs"]
mod tests;
