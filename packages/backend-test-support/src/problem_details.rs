//! Problem Details assertions that do not depend on backend types.

use serde_json::Value;

/// Assert that a parsed response body follows the problem+json contract and
/// carries the expected code and status.
///
/// `trace_header` is the value of the `x-trace-id` response header; the body's
/// `trace_id` must match it.
pub fn assert_problem_details(
    body: &Value,
    trace_header: Option<&str>,
    expected_code: &str,
    expected_status: u16,
) {
    assert_eq!(body["code"], expected_code, "unexpected error code: {body}");
    assert_eq!(body["status"], expected_status, "unexpected status: {body}");
    assert!(body["title"].is_string(), "title missing: {body}");
    assert!(body["detail"].is_string(), "detail missing: {body}");

    let type_url = body["type"].as_str().expect("type should be a string");
    assert!(
        type_url.ends_with(expected_code),
        "type `{type_url}` should end with the error code"
    );

    let trace_id = body["trace_id"]
        .as_str()
        .expect("trace_id should be a string");
    let header = trace_header.expect("x-trace-id header should be present");
    assert_eq!(trace_id, header, "trace_id in body should match x-trace-id header");
}
