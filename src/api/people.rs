//! Personal data, roles and profile pictures.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use super::{passthrough_body, relay_response};
use crate::auth::SessionCookie;
use crate::backend::RelayBody;
use crate::AppState;

/// GET /api/proxy/personal-data - The current user's personal record.
pub async fn get_personal_data(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "personal_data/",
            None,
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/public-personal-data - Another user's public record
/// (`user_id=…`).
pub async fn get_public_personal_data(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "public_personal_data/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/role - The role the session was opened with.
pub async fn get_role(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let result = state
        .backend
        .relay("GET", "role/", None, Some(&cookie.0), RelayBody::Empty)
        .await;
    relay_response(result)
}

/// GET /api/proxy/profile-pictures - The current user's photo URL.
/// A user without a photo is a plain 404, not an error envelope.
pub async fn get_profile_picture(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "profile_pictures/",
            None,
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;

    if let Ok(response) = &result {
        if response.status == StatusCode::NOT_FOUND {
            return (StatusCode::NOT_FOUND, Json(Value::Null)).into_response();
        }
    }
    relay_response(result)
}

/// POST /api/proxy/profile-pictures - Upload a photo (multipart relay).
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "profile_pictures/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}
