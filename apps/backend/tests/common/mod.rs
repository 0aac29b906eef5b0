#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    quizroom_test_support::logging::init();
}

/// Read a problem+json response and check it against the error contract.
pub async fn assert_problem_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body: Value = test::read_body_json(resp).await;
    let trace_header = headers.get("x-trace-id").and_then(|v| v.to_str().ok());
    quizroom_test_support::problem_details::assert_problem_details(
        &body,
        trace_header,
        expected_code,
        expected_status,
    );
    body
}
