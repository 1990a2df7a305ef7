//! Courses, rosters, subjects and timetables.

use axum::{
    extract::{Path, RawQuery, State},
    response::Response,
};

use super::relay_response;
use crate::auth::SessionCookie;
use crate::backend::RelayBody;
use crate::AppState;

/// GET /api/proxy/courses - Courses visible to the current user.
pub async fn list_courses(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "courses/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/courses/{id} - One course.
pub async fn get_course(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Path(id): Path<u64>,
) -> Response {
    let path = format!("courses/{}", id);
    let result = state
        .backend
        .relay("GET", &path, None, Some(&cookie.0), RelayBody::Empty)
        .await;
    relay_response(result)
}

/// GET /api/proxy/students - Student ids of a course (`course_id=…`).
pub async fn list_students(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "students/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/subjects - Subjects, optionally filtered by `course_id`.
pub async fn list_subjects(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "subjects/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}

/// GET /api/proxy/timetables - Timetable slots of a course (`course_id=…`).
pub async fn list_timetables(
    State(state): State<AppState>,
    cookie: SessionCookie,
    RawQuery(query): RawQuery,
) -> Response {
    let result = state
        .backend
        .relay(
            "GET",
            "timetables/",
            query.as_deref(),
            Some(&cookie.0),
            RelayBody::Empty,
        )
        .await;
    relay_response(result)
}
