//! Subjects page: the subject list, with course labels attached.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{list_status, PageStatus};
use crate::auth::SessionCookie;
use crate::backend::fetch_json;
use crate::errors::AppError;
use crate::models::{Course, Subject};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubjectsQuery {
    pub course_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SubjectItem {
    #[serde(flatten)]
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubjectsView {
    pub status: PageStatus,
    pub subjects: Vec<SubjectItem>,
}

/// GET /pages/subjects - Subjects (optionally for one course) with their
/// course labels resolved from a parallel course fetch.
pub async fn subjects_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Query(query): Query<SubjectsQuery>,
) -> Result<Json<SubjectsView>, AppError> {
    let backend = state.backend.as_ref();
    let subject_query = query.course_id.map(|id| format!("course_id={}", id));

    let (subjects, courses) = tokio::join!(
        fetch_json::<Vec<Subject>>(backend, "subjects/", subject_query.as_deref(), &cookie.0),
        fetch_json::<Vec<Course>>(backend, "courses/", None, &cookie.0),
    );
    let subjects = subjects?;

    let labels: HashMap<u64, String> = courses?
        .into_iter()
        .map(|course| (course.id, course.label()))
        .collect();

    let subjects: Vec<SubjectItem> = subjects
        .into_iter()
        .map(|subject| SubjectItem {
            course_label: labels.get(&subject.course_id).cloned(),
            subject,
        })
        .collect();

    Ok(Json(SubjectsView {
        status: list_status(&subjects),
        subjects,
    }))
}
