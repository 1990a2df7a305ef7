//! Catch-all relay for backend resources without a dedicated route.

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};

use super::{passthrough_body, relay_response};
use crate::auth::SessionCookie;
use crate::errors::AppError;
use crate::AppState;

/// ANY /api/proxy/{*path} - Forward whatever was not matched above. The
/// tail is relayed verbatim, so callers address backend resources by
/// their upstream names (e.g. `roles/`).
pub async fn relay_any(
    State(state): State<AppState>,
    cookie: SessionCookie,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let method = match method {
        Method::GET | Method::POST | Method::PUT | Method::DELETE => method,
        other => {
            return AppError::Validation(format!("Method {} is not relayed", other))
                .into_response()
        }
    };

    let result = state
        .backend
        .relay(
            method.as_str(),
            &path,
            query.as_deref(),
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}
