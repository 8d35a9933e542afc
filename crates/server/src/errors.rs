use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON-rendered API error: `{"error": {"code", "message", "details"?}}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub details: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, code: &'static str, details: Option<String>) -> Self {
        Self { status, code, details }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(code = self.code, details = ?self.details, "request failed");
        }
        let body = serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.status.canonical_reason().unwrap_or("error"),
                "details": self.details,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::Validation(_) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "validation_error", Some(e.to_string()))
            }
            ServiceError::NotFound(_) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "not_found", Some(e.to_string()))
            }
            ServiceError::Storage(_) => JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                Some(e.to_string()),
            ),
        }
    }
}
