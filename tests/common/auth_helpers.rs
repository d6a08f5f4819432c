//! Authentication test helpers
//!
//! Provides utilities for registering identities through the API,
//! logging them in and building authenticated requests.

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use uuid::Uuid;

/// Registered and logged-in identity
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    /// `Authorization` header carrying this user's token
    pub fn auth(&self) -> (HeaderName, HeaderValue) {
        auth_header(&self.token)
    }
}

/// Create authorization header
pub fn auth_header(token: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", token)).expect("Invalid token header");
    (AUTHORIZATION, value)
}

/// Sign up through the API and log in
pub async fn register_user(server: &TestServer, email: &str, name: &str) -> TestUser {
    let password = "secret123";

    let response = server
        .put("/auth/signup")
        .json(&serde_json::json!({
            "email": email,
            "name": name,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "signup failed: {}", response.text());

    let response = server
        .post("/auth/login")
        .json(&serde_json::json!({
            "email": email,
            "password": password,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed: {}", response.text());

    let body: serde_json::Value = response.json();
    TestUser {
        id: body["userId"].as_str().and_then(|s| Uuid::parse_str(s).ok()).expect("Missing userId"),
        email: email.to_string(),
        password: password.to_string(),
        token: body["token"].as_str().expect("Missing token").to_string(),
    }
}

/// Register a user with a unique email
pub async fn register_unique_user(server: &TestServer, name: &str) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    register_user(server, &email, name).await
}

/// Multipart body with title, content and a png image
pub fn post_form(title: &str, content: &str, file_name: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("content", content)
        .add_part("image", png_part(file_name))
}

/// Multipart body that keeps the current image
pub fn post_form_keeping_image(title: &str, content: &str, image_ref: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title)
        .add_text("content", content)
        .add_text("image", image_ref)
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\nfake".to_vec())
        .file_name(file_name)
        .mime_type("image/png")
}
