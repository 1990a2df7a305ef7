//! Exams page: assessments with subject names, kind filter and due order.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{list_status, PageStatus};
use crate::auth::SessionCookie;
use crate::backend::fetch_json;
use crate::errors::AppError;
use crate::models::{Assessment, AssessmentKind, DueStatus, Subject};
use crate::stores::SubjectCache;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExamsQuery {
    /// Restrict to one assessment kind
    #[serde(rename = "type")]
    pub kind: Option<AssessmentKind>,
    /// `asc` (default) or `desc` by due date
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExamItem {
    #[serde(flatten)]
    pub assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_status: Option<DueStatus>,
}

#[derive(Debug, Serialize)]
pub struct ExamsView {
    pub status: PageStatus,
    pub exams: Vec<ExamItem>,
}

/// GET /pages/exams - Assessments and subjects fetched together, then
/// filtered and ordered locally.
pub async fn exams_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Query(query): Query<ExamsQuery>,
) -> Result<Json<ExamsView>, AppError> {
    let backend = state.backend.as_ref();

    let (assessments, subjects) = tokio::join!(
        fetch_json::<Vec<Assessment>>(backend, "assessments/", None, &cookie.0),
        fetch_json::<Vec<Subject>>(backend, "subjects/", None, &cookie.0),
    );

    let mut subject_cache = SubjectCache::default();
    subject_cache.fill(subjects?);

    let today = chrono::Local::now().date_naive();
    let view = build_view(assessments?, &subject_cache, &query, today);
    Ok(Json(view))
}

pub(crate) fn build_view(
    assessments: Vec<Assessment>,
    subjects: &SubjectCache,
    query: &ExamsQuery,
    today: NaiveDate,
) -> ExamsView {
    let descending = query.order.as_deref() == Some("desc");

    let mut exams: Vec<ExamItem> = assessments
        .into_iter()
        .filter(|a| query.kind.map_or(true, |kind| a.kind == kind))
        .map(|assessment| ExamItem {
            subject_name: subjects.name_of(assessment.subject_id).map(str::to_string),
            due_status: assessment.due_status(today),
            assessment,
        })
        .collect();

    exams.sort_by(|a, b| {
        let ordering = a.assessment.due_date.cmp(&b.assessment.due_date);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    ExamsView {
        status: list_status(&exams),
        exams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(id: u64, kind: AssessmentKind, due: &str) -> Assessment {
        Assessment {
            id,
            subject_id: 4,
            task: format!("Tarea {}", id),
            due_date: due.into(),
            created_at: None,
            kind,
            questions: None,
            correct: None,
            incorrect1: None,
            incorrect2: None,
        }
    }

    fn cache() -> SubjectCache {
        let mut cache = SubjectCache::default();
        cache.fill(vec![Subject {
            id: 4,
            name: "Historia".into(),
            course_id: 5,
            teacher_id: 2,
        }]);
        cache
    }

    #[test]
    fn test_filter_and_order() {
        let assessments = vec![
            assessment(1, AssessmentKind::Exam, "2024-06-20"),
            assessment(2, AssessmentKind::Homework, "2024-06-05"),
            assessment(3, AssessmentKind::Exam, "2024-06-01"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();

        let query = ExamsQuery {
            kind: Some(AssessmentKind::Exam),
            order: None,
        };
        let view = build_view(assessments.clone(), &cache(), &query, today);
        assert_eq!(view.exams.len(), 2);
        assert_eq!(view.exams[0].assessment.id, 3);
        assert_eq!(view.exams[0].due_status, Some(DueStatus::Past));
        assert_eq!(view.exams[1].due_status, Some(DueStatus::Upcoming));
        assert_eq!(view.exams[0].subject_name.as_deref(), Some("Historia"));

        let query = ExamsQuery {
            kind: None,
            order: Some("desc".into()),
        };
        let view = build_view(assessments, &cache(), &query, today);
        assert_eq!(view.exams[0].assessment.id, 1);
        assert_eq!(view.status, PageStatus::Populated);
    }

    #[test]
    fn test_empty_view() {
        let query = ExamsQuery {
            kind: None,
            order: None,
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        let view = build_view(vec![], &cache(), &query, today);
        assert_eq!(view.status, PageStatus::Empty);
    }
}
