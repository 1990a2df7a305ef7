//! Grades page: course → student selection, then grades grouped by
//! assessment.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use super::{fetch_role, list_status, PageStatus};
use crate::auth::SessionCookie;
use crate::backend::fetch_json;
use crate::errors::AppError;
use crate::flow::{SelectionEvent, SelectionFlow, SelectionStep};
use crate::models::{
    Assessment, Course, Grade, PersonalData, PublicPersonalData, Role, Student, Subject,
};
use crate::stores::{ChildSelectionStore, SubjectCache};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    pub course_id: Option<u64>,
    pub student_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CourseOption {
    pub id: u64,
    pub label: String,
}

/// Grades for one assessment; the `None` assessment bucket collects
/// free-standing grades.
#[derive(Debug, Serialize)]
pub struct AssessmentGrades {
    pub assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    pub grades: Vec<Grade>,
}

/// The page at whichever selection step the query landed on.
#[derive(Debug, Serialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum GradesView {
    Course {
        courses: Vec<CourseOption>,
    },
    Student {
        students: Vec<Student>,
    },
    Resource {
        status: PageStatus,
        groups: Vec<AssessmentGrades>,
    },
}

/// GET /pages/grades - Walk the selection flow and show grades.
pub async fn grades_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<GradesView>, AppError> {
    let backend = state.backend.as_ref();
    let role = fetch_role(backend, &cookie).await?;

    let children = match role {
        Role::Father => {
            let personal: PersonalData =
                fetch_json(backend, "personal_data/", None, &cookie.0).await?;
            personal.children
        }
        _ => Vec::new(),
    };

    let mut flow = SelectionFlow::start(role, &children);

    // The child-selection store owns which child a father is viewing; a
    // single child is selected implicitly.
    let mut child_selection = ChildSelectionStore::default();
    if let (Role::Father, [only]) = (role, children.as_slice()) {
        child_selection.select(only.clone());
    }

    // Replay the query's selections onto the flow.
    if flow.step() == SelectionStep::Course {
        let Some(course_id) = query.course_id else {
            let courses: Vec<Course> = fetch_json(backend, "courses/", None, &cookie.0).await?;
            let courses = courses
                .into_iter()
                .map(|c| CourseOption {
                    id: c.id,
                    label: c.label(),
                })
                .collect();
            return Ok(Json(GradesView::Course { courses }));
        };
        flow.apply(SelectionEvent::CourseChosen(course_id))?;
    }

    if flow.step() == SelectionStep::Student {
        let Some(student_id) = query.student_id else {
            let students = match role {
                Role::Father => children.iter().map(Student::from_child).collect(),
                _ => {
                    // The flow guarantees a course at this step.
                    let course_id = flow.selected_course().ok_or_else(|| {
                        AppError::Internal("Student step without a course".to_string())
                    })?;
                    fetch_roster(&state, &cookie, course_id).await?
                }
            };
            return Ok(Json(GradesView::Student { students }));
        };

        if role == Role::Father {
            let child = children
                .iter()
                .find(|c| c.id == student_id)
                .cloned()
                .ok_or_else(|| {
                    AppError::Validation("Selected child does not belong to this user".to_string())
                })?;
            child_selection.select(child);
        }
        flow.apply(SelectionEvent::StudentChosen(student_id))?;
    }

    // Terminal step: students fetch their own grades, fathers ask for the
    // selected child's, staff for the selected student's.
    let student_query = match role {
        Role::Student => None,
        Role::Father => child_selection
            .selected()
            .map(|child| format!("student_id={}", child.id)),
        _ => flow.selected_student().map(|id| format!("student_id={}", id)),
    };

    let (grades, assessments, subjects) = tokio::join!(
        fetch_json::<Vec<Grade>>(backend, "grades/", student_query.as_deref(), &cookie.0),
        fetch_json::<Vec<Assessment>>(backend, "assessments/", None, &cookie.0),
        fetch_json::<Vec<Subject>>(backend, "subjects/", None, &cookie.0),
    );
    let grades = grades?;

    let mut subject_cache = SubjectCache::default();
    subject_cache.fill(subjects?);

    let groups = group_by_assessment(grades, assessments?, &subject_cache);
    let status = list_status(&groups);
    Ok(Json(GradesView::Resource { status, groups }))
}

/// The backend lists a course roster as bare ids; names come from one
/// public-personal-data lookup per student, fanned out concurrently.
/// Failed lookups drop out of the roster.
pub(crate) async fn fetch_roster(
    state: &AppState,
    cookie: &SessionCookie,
    course_id: u64,
) -> Result<Vec<Student>, AppError> {
    let query = format!("course_id={}", course_id);
    let ids: Vec<u64> = fetch_json(
        state.backend.as_ref(),
        "students/",
        Some(query.as_str()),
        &cookie.0,
    )
    .await?;

    let mut lookups = JoinSet::new();
    for id in ids.iter().copied() {
        let backend = state.backend.clone();
        let cookie = cookie.0.clone();
        lookups.spawn(async move {
            let query = format!("user_id={}", id);
            let data: Result<Vec<PublicPersonalData>, _> = fetch_json(
                backend.as_ref(),
                "public_personal_data/",
                Some(query.as_str()),
                &cookie,
            )
            .await;
            (id, data.ok().and_then(|mut list| list.drain(..).next()))
        });
    }

    let mut by_id = HashMap::new();
    while let Some(joined) = lookups.join_next().await {
        if let Ok((id, data)) = joined {
            by_id.insert(id, data);
        }
    }

    // Rebuild in roster order, dropping duplicates and failed lookups.
    let mut students = Vec::new();
    for id in ids {
        match by_id.remove(&id) {
            Some(Some(data)) => students.push(Student {
                id,
                full_name: data.full_name,
                course_id,
                photo: data.photo,
            }),
            _ => continue,
        }
    }
    Ok(students)
}

/// Group grades under their assessments; grades without a matching
/// assessment collect in a trailing bucket.
pub(crate) fn group_by_assessment(
    grades: Vec<Grade>,
    assessments: Vec<Assessment>,
    subjects: &SubjectCache,
) -> Vec<AssessmentGrades> {
    let mut by_assessment: HashMap<u64, Vec<Grade>> = HashMap::new();
    let mut unattached = Vec::new();

    let known: std::collections::HashSet<u64> = assessments.iter().map(|a| a.id).collect();
    for grade in grades {
        match grade.assessment_id.filter(|id| known.contains(id)) {
            Some(id) => by_assessment.entry(id).or_default().push(grade),
            None => unattached.push(grade),
        }
    }

    let mut groups = Vec::new();
    for assessment in assessments {
        let grades = by_assessment.remove(&assessment.id).unwrap_or_default();
        if grades.is_empty() {
            continue;
        }
        let subject_name = subjects.name_of(assessment.subject_id).map(str::to_string);
        groups.push(AssessmentGrades {
            assessment: Some(assessment),
            subject_name,
            grades,
        });
    }
    if !unattached.is_empty() {
        groups.push(AssessmentGrades {
            assessment: None,
            subject_name: None,
            grades: unattached,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssessmentKind;

    fn grade(id: u64, assessment_id: Option<u64>) -> Grade {
        Grade {
            id,
            subject_id: 3,
            assessment_id,
            student_id: 12,
            grade_type: None,
            grade: 7.0,
            description: None,
            created_at: None,
        }
    }

    fn assessment(id: u64) -> Assessment {
        Assessment {
            id,
            subject_id: 3,
            task: format!("Tarea {}", id),
            due_date: "2024-06-01".into(),
            created_at: None,
            kind: AssessmentKind::Exam,
            questions: None,
            correct: None,
            incorrect1: None,
            incorrect2: None,
        }
    }

    #[test]
    fn test_group_by_assessment() {
        let subjects = SubjectCache::default();
        let groups = group_by_assessment(
            vec![grade(1, Some(7)), grade(2, Some(7)), grade(3, None)],
            vec![assessment(7), assessment(8)],
            &subjects,
        );

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].assessment.as_ref().map(|a| a.id), Some(7));
        assert_eq!(groups[0].grades.len(), 2);
        // Assessment 8 has no grades and is skipped; the free-standing
        // grade lands in the trailing bucket.
        assert!(groups[1].assessment.is_none());
        assert_eq!(groups[1].grades.len(), 1);
    }

    #[test]
    fn test_grade_pointing_at_unknown_assessment_is_unattached() {
        let subjects = SubjectCache::default();
        let groups =
            group_by_assessment(vec![grade(1, Some(99))], vec![assessment(7)], &subjects);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].assessment.is_none());
    }
}
