//! Login, logout and token verification.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::relay_response;
use crate::auth::{self, SessionCookie};
use crate::backend::RelayBody;
use crate::errors::AppError;
use crate::AppState;

/// POST /api/proxy/login - Exchange credentials for a session cookie.
///
/// The backend mints the `jwt` cookie; the portal harvests it from the
/// backend's `Set-Cookie` and re-issues it on its own origin.
pub async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    if body.get("role").is_none() {
        return AppError::Validation("Missing \"role\" field".to_string()).into_response();
    }

    let result = state
        .backend
        .relay("POST", "login/", None, None, RelayBody::Json(body))
        .await;

    let response = match result {
        Ok(response) if response.status.is_success() => response,
        other => return relay_response(other),
    };

    let Some(token) = auth::harvest_session_cookie(&response.set_cookies) else {
        return AppError::Upstream("Backend login sent no session cookie".to_string())
            .into_response();
    };

    tracing::info!("Session established");
    (
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            auth::issue_cookie(&token, &state.config),
        )],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// POST /api/proxy/logout - End the session on both origins.
pub async fn logout(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let result = state
        .backend
        .relay("POST", "logout/", None, Some(&cookie.0), RelayBody::Empty)
        .await;

    // The portal cookie is cleared no matter what the backend said.
    let mut response = relay_response(result);
    if let Ok(value) = auth::clear_cookie(&state.config).parse() {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// GET /api/proxy/verify-token - Ask the backend whether the session holds.
pub async fn verify_token(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let result = state
        .backend
        .relay("GET", "verify_token/", None, Some(&cookie.0), RelayBody::Empty)
        .await;
    relay_response(result)
}
