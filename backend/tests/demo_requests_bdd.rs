//! Behavioural tests for demo request intake over a real HTTP server.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[path = "support/harness.rs"]
mod harness;
#[path = "support/http.rs"]
mod http_support;

use actix_web::http::Method;
use harness::{INDEX_HTML, WorldFixture};
use http_support::{DEMO_REQUESTS_PATH, Payload, get, last_response, perform, post_demo_request};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn complete_payload(business_name: &str) -> Value {
    json!({
        "businessName": business_name,
        "contactName": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
    })
}

fn listed_entries(world: &WorldFixture) -> Vec<Value> {
    last_response(&world.world(), |last| {
        last.body
            .as_ref()
            .and_then(|body| body["data"].as_array())
            .cloned()
            .expect("listing data array")
    })
}

fn error_fields(world: &WorldFixture) -> Vec<(String, String)> {
    last_response(&world.world(), |last| {
        last.body
            .as_ref()
            .and_then(|body| body["errors"].as_array())
            .expect("errors array")
            .iter()
            .map(|entry| {
                (
                    entry["field"].as_str().unwrap_or_default().to_owned(),
                    entry["code"].as_str().unwrap_or_default().to_owned(),
                )
            })
            .collect()
    })
}

#[given("a running server with an empty record store")]
fn a_running_server_with_an_empty_record_store(world: &WorldFixture) {
    assert!(world.world().borrow().submitted_ids.is_empty());
}

#[given("two demo requests were submitted one after the other")]
fn two_demo_requests_were_submitted(world: &WorldFixture) {
    let shared = world.world();
    for name in ["First Bakery", "Second Bakery"] {
        post_demo_request(&shared, complete_payload(name));
        last_response(&shared, |last| assert_eq!(last.status, 201));
    }
}

#[given("the same demo request was submitted twice")]
fn the_same_demo_request_was_submitted_twice(world: &WorldFixture) {
    let shared = world.world();
    for _ in 0..2 {
        post_demo_request(&shared, complete_payload("Corner Coffee"));
        last_response(&shared, |last| assert_eq!(last.status, 201));
    }
}

#[when("a complete demo request is submitted")]
fn a_complete_demo_request_is_submitted(world: &WorldFixture) {
    post_demo_request(&world.world(), complete_payload("Corner Coffee"));
}

#[when("a demo request with a blank business name and a malformed email is submitted")]
fn an_invalid_demo_request_is_submitted(world: &WorldFixture) {
    post_demo_request(
        &world.world(),
        json!({
            "businessName": "   ",
            "contactName": "Ada Lovelace",
            "email": "ada-at-example",
            "phone": "555-0100",
        }),
    );
}

#[when("a body that is not JSON is submitted")]
fn a_body_that_is_not_json_is_submitted(world: &WorldFixture) {
    perform(
        &world.world(),
        Method::POST,
        DEMO_REQUESTS_PATH,
        Payload::RawJson("{\"businessName\": "),
    );
}

#[when("the demo requests are listed")]
fn the_demo_requests_are_listed(world: &WorldFixture) {
    get(&world.world(), DEMO_REQUESTS_PATH);
}

#[when("an unknown API path is requested")]
fn an_unknown_api_path_is_requested(world: &WorldFixture) {
    get(&world.world(), "/api/unknown-endpoint");
}

#[when("a client-side route is requested")]
fn a_client_side_route_is_requested(world: &WorldFixture) {
    get(&world.world(), "/pricing/enterprise");
}

#[when("the readiness check is requested")]
fn the_readiness_check_is_requested(world: &WorldFixture) {
    get(&world.world(), "/health/ready");
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    last_response(&world.world(), |last| {
        assert_eq!(last.status, status, "unexpected body: {}", last.text);
    });
}

#[then("the response confirms the submission with an identifier")]
fn the_response_confirms_the_submission(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        let body = last.body.as_ref().expect("json body");
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Demo request submitted successfully"));
        let id = body["id"].as_str().expect("id string");
        assert!(uuid::Uuid::parse_str(id).is_ok(), "id should be a UUID: {id}");
    });
}

#[then("the listing contains exactly the submitted request")]
fn the_listing_contains_exactly_the_submitted_request(world: &WorldFixture) {
    let entries = listed_entries(world);
    let submitted = world.world().borrow().submitted_ids.clone();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry["id"].as_str(), submitted.first().map(String::as_str));
    assert_eq!(entry["businessName"], json!("Corner Coffee"));
    assert_eq!(entry["contactName"], json!("Ada Lovelace"));
    assert_eq!(entry["email"], json!("ada@example.com"));
    assert_eq!(entry["phone"], json!("555-0100"));
    assert!(entry["createdAt"].is_string());
}

#[then("the validation errors name businessName and email")]
fn the_validation_errors_name_business_name_and_email(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        let body = last.body.as_ref().expect("json body");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Validation error"));
    });
    assert_eq!(
        error_fields(world),
        [
            ("businessName".to_owned(), "empty_field".to_owned()),
            ("email".to_owned(), "invalid_email".to_owned()),
        ]
    );
}

#[then("the validation errors report an invalid body")]
fn the_validation_errors_report_an_invalid_body(world: &WorldFixture) {
    assert_eq!(
        error_fields(world),
        [("body".to_owned(), "invalid_body".to_owned())]
    );
}

#[then("the listing is empty")]
fn the_listing_is_empty(world: &WorldFixture) {
    assert!(listed_entries(world).is_empty());
}

#[then("the second submission is listed first")]
fn the_second_submission_is_listed_first(world: &WorldFixture) {
    let names: Vec<String> = listed_entries(world)
        .iter()
        .filter_map(|entry| entry["businessName"].as_str().map(str::to_owned))
        .collect();
    assert_eq!(names, ["Second Bakery", "First Bakery"]);
}

#[then("the listing holds both submissions under distinct identifiers")]
fn the_listing_holds_both_submissions(world: &WorldFixture) {
    let submitted = world.world().borrow().submitted_ids.clone();
    assert_eq!(submitted.len(), 2);
    assert_ne!(submitted[0], submitted[1]);

    let entries = listed_entries(world);
    assert_eq!(entries.len(), 2);
    let mut listed: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry["id"].as_str().map(str::to_owned))
        .collect();
    let mut expected = submitted;
    listed.sort();
    expected.sort();
    assert_eq!(listed, expected);
    assert!(entries.iter().all(|entry| entry["businessName"] == json!("Corner Coffee")));
}

#[then("the readiness report shows a healthy record store")]
fn the_readiness_report_shows_a_healthy_record_store(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        let body = last.body.as_ref().expect("json body");
        assert_eq!(body["status"], json!("ready"));
        assert_eq!(body["checks"]["recordStore"], json!(true));
        assert_eq!(body["checks"]["frontend"], json!(true));
    });
}

#[then("the response is the not found envelope")]
fn the_response_is_the_not_found_envelope(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        let body = last.body.as_ref().expect("json body");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Not found"));
        assert_eq!(body["code"], json!("not_found"));
    });
}

#[then("the frontend entry page is returned")]
fn the_frontend_entry_page_is_returned(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        assert_eq!(last.text, INDEX_HTML);
        assert!(
            last.content_type
                .as_deref()
                .is_some_and(|value| value.starts_with("text/html"))
        );
    });
}

#[then("the response carries a trace identifier")]
fn the_response_carries_a_trace_identifier(world: &WorldFixture) {
    last_response(&world.world(), |last| {
        let trace_id = last.trace_id.as_deref().expect("trace-id header");
        assert!(uuid::Uuid::parse_str(trace_id).is_ok());
    });
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "A valid submission is stored and listed"
)]
fn valid_submission_is_stored_and_listed(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "An invalid submission reports every failing field"
)]
fn invalid_submission_reports_every_failing_field(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "A malformed body is rejected"
)]
fn malformed_body_is_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "Listings show the newest request first"
)]
fn listings_show_newest_first(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "Identical submissions are stored as separate requests"
)]
fn identical_submissions_are_stored_separately(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "Unknown API paths return a JSON not found envelope"
)]
fn unknown_api_paths_return_not_found(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "Client-side routes fall back to the frontend entry page"
)]
fn client_routes_fall_back_to_entry_page(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "Every response carries a trace identifier"
)]
fn responses_carry_trace_identifier(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/demo_requests.feature",
    name = "The readiness check reports ready"
)]
fn readiness_check_reports_ready(world: WorldFixture) {
    drop(world);
}
