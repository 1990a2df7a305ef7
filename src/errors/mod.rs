//! Error handling module for the portal server.
//!
//! Every failure surfaces to the client as the uniform `{ "error": … }`
//! envelope with an appropriate status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Session credential missing or rejected
    Unauthorized(String),
    /// Client-side form/input validation failure; nothing was sent upstream
    Validation(String),
    /// The backend answered with a non-success status; its payload is relayed
    Backend { status: StatusCode, body: Value },
    /// Transport-level failure talking to the backend
    Upstream(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Backend { status, .. } => *status,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Payload placed under the `error` key of the envelope.
    pub fn detail(&self) -> Value {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Validation(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => Value::String(msg.clone()),
            AppError::Backend { body, .. } => body.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            AppError::Validation(msg) => write!(f, "validation: {}", msg),
            AppError::Backend { status, body } => {
                write!(f, "backend {}: {}", status, body)
            }
            AppError::Upstream(msg) => write!(f, "upstream: {}", msg),
            AppError::Internal(msg) => write!(f, "internal: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Backend transport error: {:?}", err);
        AppError::Upstream("Request to the backend failed".to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Backend payload error: {:?}", err);
        AppError::Upstream("Unreadable backend response".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.detail() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized("no cookie".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("bad grade".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("refused".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_error_keeps_status_and_payload() {
        let err = AppError::Backend {
            status: StatusCode::CONFLICT,
            body: json!("duplicate grade"),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.detail(), json!("duplicate grade"));
    }
}
