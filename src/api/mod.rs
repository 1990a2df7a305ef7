//! Proxy routes.
//!
//! One thin handler per backend resource under `/api/proxy/…`. Every
//! handler requires the session cookie, forwards the request to its fixed
//! backend path, and answers with the backend's status and body verbatim.
//! Backend failures come back as the `{ "error": … }` envelope carrying
//! the backend's status, or 500 when the transport itself failed.

mod assessments;
mod courses;
mod messages;
mod people;
mod relay;
mod session;

pub use assessments::*;
pub use courses::*;
pub use messages::*;
pub use people::*;
pub use relay::*;
pub use session::*;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::backend::{BackendResponse, RelayBody};
use crate::errors::AppError;

/// Inbound POST/PUT bodies relay as opaque bytes with their content type
/// intact, so JSON and multipart uploads take the same path.
pub(crate) fn passthrough_body(headers: &HeaderMap, bytes: Bytes) -> RelayBody {
    if bytes.is_empty() {
        return RelayBody::Empty;
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    RelayBody::Raw {
        content_type,
        bytes: bytes.to_vec(),
    }
}

/// Turn a relay outcome into the client response.
pub(crate) fn relay_response(result: Result<BackendResponse, AppError>) -> Response {
    match result {
        Ok(response) if response.status.is_success() => verbatim(response),
        Ok(response) => {
            let body = response.json().unwrap_or(Value::Null);
            AppError::Backend {
                status: response.status,
                body,
            }
            .into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// The backend's answer, untouched.
pub(crate) fn verbatim(response: BackendResponse) -> Response {
    let mut builder = Response::builder().status(response.status);
    if let Some(content_type) = response.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|e| {
            AppError::Internal(format!("Failed to build response: {}", e)).into_response()
        })
}
