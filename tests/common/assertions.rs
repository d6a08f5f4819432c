//! Custom assertion macros and utilities
//!
//! Provides assertions for the JSON error body every failed request
//! returns.

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert status code and the `error` message of a failed response
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "unexpected body: {}", response.text());
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], message);
    assert_eq!(body["status"], status.as_u16());
}
