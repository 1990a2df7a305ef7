//! Course messages and subject messages.

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    response::Response,
};

use super::{passthrough_body, relay_response};
use crate::auth::SessionCookie;
use crate::backend::RelayBody;
use crate::AppState;

/// GET /api/proxy/messages - Messages for the current user's courses.
pub async fn list_messages(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "messages/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/messages - Broadcast a message to courses.
pub async fn create_message(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "messages/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/subject-messages - Messages of a subject (`subject_id=…`).
pub async fn list_subject_messages(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "subject_messages/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/subject-messages - Post into a subject. Multipart
/// bodies (file uploads) relay with their boundary intact.
pub async fn create_subject_message(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "subject_messages/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// DELETE /api/proxy/subject-messages/{id} - Remove a subject message.
pub async fn delete_subject_message(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Path(id): Path<u64>,
) -> Response {
    let path = format!("subject_messages/{}", id);
    let result = state
        .backend
        .relay("DELETE", &path, None, Some(&cookie.0), RelayBody::Empty)
        .await;
    relay_response(result)
}
