/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 422,
 *   "data": [{"field": "title", "message": "Title must not be empty."}]
 * }
 * ```
 *
 * `data` is present only for validation failures.
 */
use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::BackendError;
use crate::shared::FieldError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status.as_u16(), self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status.as_u16(), self);
        }

        let mut body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        let fields: Vec<FieldError> = self
            .field_errors()
            .iter()
            .filter_map(|e| e.to_field_error())
            .collect();
        if !fields.is_empty() {
            body["data"] = serde_json::json!(fields);
        }

        (status, Json(body)).into_response()
    }
}
