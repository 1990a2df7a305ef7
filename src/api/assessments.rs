//! Assessments, selfassessable quizzes and grades.

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

/// GET /api/proxy/assessments - Assessments, optionally by `subject_id`.
pub async fn list_assessments(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "assessments/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/assessments - Create an assessment (optionally with its
/// embedded quiz).
pub async fn create_assessment(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "assessments/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/selfassessables - Quiz questions (`assessment_id=…`).
pub async fn list_selfassessables(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "selfassessables/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/selfassessables - Submit a student's quiz answers.
pub async fn submit_selfassessable(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "selfassessables/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/get-if-selfassessable-answered - Whether the student
/// already answered a quiz.
pub async fn get_if_selfassessable_answered(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "get_if_selfassessable_answered/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/grades - Grades, optionally filtered by `student_id`.
pub async fn list_grades(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "grades/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// POST /api/proxy/grades - Record a grade.
pub async fn create_grade(
    State(state): State<AppState>,
    cookie: SessionCookie,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let result = state
        .backend
        .relay(
            "POST",
            "grades/",
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// PUT /api/proxy/grades/{id} - Rewrite a grade.
pub async fn update_grade(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Path(id): Path<u64>,
    headers: HeaderMap,
    bytes: Bytes,
) -> Response {
    let path = format!("grades/{}", id);
    let result = state
        .backend
        .relay(
            "PUT",
            &path,
            None,
            Some(&cookie.0),
            passthrough_body(&headers, bytes),
        )
        .await;
    relay_response(result)
}

/// DELETE /api/proxy/grades/{id} - Remove a grade.
pub async fn delete_grade(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Path(id): Path<u64>,
) -> Response {
    let path = format!("grades/{}", id);
    let result = state
        .backend
        .relay("DELETE", &path, None, Some(&cookie.0), RelayBody::Empty)
        .await;
    relay_response(result)
}
