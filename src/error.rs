// HTTP API error types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::records::RecordsError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every failure serializes as `{"status": <code>, "error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed payload)
    BadRequest(String),

    // 401 Unauthorized (credential mismatch)
    Unauthorized(String),

    // 403 Forbidden (no credential supplied)
    Forbidden(String),

    // 404 Not Found (record id absent)
    NotFound(String),

    // 501 Not Implemented
    NotImplemented(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (records store failure)
    BadGateway(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::NotImplemented(_) => 501,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::NotImplemented(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": self.status_code(),
            "error": self.message(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        ApiError::NotImplemented(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<RecordsError> for ApiError {
    fn from(err: RecordsError) -> Self {
        match err {
            RecordsError::NotFound(what) => ApiError::not_found(format!("{} not found.", what)),
            other => {
                tracing::error!(error = %other, "records store request failed");
                ApiError::bad_gateway("Records store request failed.")
            }
        }
    }
}
