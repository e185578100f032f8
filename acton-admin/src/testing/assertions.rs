//! Response assertions for admin routes

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert a `303 See Other` pointing at `expected_path`
///
/// # Panics
///
/// Panics if the status or the `Location` header differ
pub fn assert_redirect(response: &TestResponse, expected_path: &str) {
    assert_eq!(
        response.status_code(),
        StatusCode::SEE_OTHER,
        "Expected a redirect to {expected_path}"
    );
    let header = response
        .headers()
        .get("Location")
        .expect("Location header not found");
    let actual = header.to_str().expect("Invalid Location header value");
    assert_eq!(
        actual, expected_path,
        "Expected Location to be {expected_path}, got {actual}"
    );
}

/// Assert an `HX-Redirect` header pointing at `expected_path`
///
/// # Panics
///
/// Panics if the header is missing or has a different value
pub fn assert_hx_redirect(response: &TestResponse, expected_path: &str) {
    let header = response
        .headers()
        .get("HX-Redirect")
        .expect("HX-Redirect header not found");
    let actual = header.to_str().expect("Invalid HX-Redirect header value");
    assert_eq!(
        actual, expected_path,
        "Expected HX-Redirect to {expected_path}, got {actual}"
    );
}

/// Assert the body is a bare fragment, not a layout page
///
/// # Panics
///
/// Panics if the body contains the document type
pub fn assert_fragment(response: &TestResponse) {
    let body = response.text();
    assert!(
        !body.contains("<!DOCTYPE html>"),
        "Expected a fragment, got a full page"
    );
}

/// Assert the body is wrapped in the layout
///
/// # Panics
///
/// Panics if the body lacks the document type
pub fn assert_full_page(response: &TestResponse) {
    let body = response.text();
    assert!(
        body.contains("<!DOCTYPE html>"),
        "Expected a full page, got a fragment"
    );
}
