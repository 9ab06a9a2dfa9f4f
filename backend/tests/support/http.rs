//! Thin awc helpers recording responses into the shared world.

use actix_web::http::{Method, header};
use awc::Client;
use goloyal::domain::TRACE_ID_HEADER;
use serde_json::Value;

use super::harness::{LastResponse, SharedWorld, with_world_async};

pub(crate) const DEMO_REQUESTS_PATH: &str = "/api/demo-requests";

/// Request body sent by a step.
pub(crate) enum Payload {
    Empty,
    Json(Value),
    RawJson(&'static str),
}

fn header_value(headers: &actix_web::http::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send a request and record the response as the world's last exchange.
pub(crate) fn perform(world: &SharedWorld, method: Method, path: &'static str, payload: Payload) {
    let last = with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Payload::Empty => request.send().await.expect("request"),
            Payload::Json(value) => request.send_json(&value).await.expect("json request"),
            Payload::RawJson(raw) => request
                .insert_header((header::CONTENT_TYPE, "application/json"))
                .send_body(raw)
                .await
                .expect("raw request"),
        };
        let status = response.status().as_u16();
        let content_type = header_value(response.headers(), header::CONTENT_TYPE.as_str());
        let trace_id = header_value(response.headers(), TRACE_ID_HEADER);
        let bytes = response.body().await.expect("body");
        LastResponse {
            status,
            body: serde_json::from_slice(&bytes).ok(),
            text: String::from_utf8_lossy(&bytes).into_owned(),
            content_type,
            trace_id,
        }
    });

    let mut ctx = world.borrow_mut();
    if last.status == 201 {
        if let Some(id) = last.body.as_ref().and_then(|body| body["id"].as_str()) {
            ctx.submitted_ids.push(id.to_owned());
        }
    }
    ctx.last = Some(last);
}

/// POST a JSON value to the demo request endpoint.
pub(crate) fn post_demo_request(world: &SharedWorld, payload: Value) {
    perform(world, Method::POST, DEMO_REQUESTS_PATH, Payload::Json(payload));
}

/// GET any path on the running server.
pub(crate) fn get(world: &SharedWorld, path: &'static str) {
    perform(world, Method::GET, path, Payload::Empty);
}

/// Inspect the last recorded response.
pub(crate) fn last_response<R>(world: &SharedWorld, inspect: impl FnOnce(&LastResponse) -> R) -> R {
    let ctx = world.borrow();
    let last = ctx.last.as_ref().expect("a request has been made");
    inspect(last)
}
