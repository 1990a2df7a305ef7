//! Timetable page: the fixed weekly grid for one course.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{list_status, PageStatus};
use crate::auth::SessionCookie;
use crate::backend::fetch_json;
use crate::errors::AppError;
use crate::models::{Subject, TimetableGrid, TimetableSlot, SCHOOL_DAYS, TIME_BLOCKS};
use crate::stores::SubjectCache;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    pub course_id: u64,
}

#[derive(Debug, Serialize)]
pub struct GridCell {
    pub subject_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Serialize)]
pub struct GridRow {
    pub block: u8,
    pub range: String,
    /// Monday through Friday, one cell list per day
    pub days: Vec<Vec<GridCell>>,
}

#[derive(Debug, Serialize)]
pub struct TimetableView {
    pub status: PageStatus,
    pub rows: Vec<GridRow>,
}

/// GET /pages/timetable - Slots and subjects for a course, laid out on
/// the 8×5 grid.
pub async fn timetable_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<TimetableView>, AppError> {
    let backend = state.backend.as_ref();
    let course_query = format!("course_id={}", query.course_id);

    let (slots, subjects) = tokio::join!(
        fetch_json::<Vec<TimetableSlot>>(
            backend,
            "timetables/",
            Some(course_query.as_str()),
            &cookie.0
        ),
        fetch_json::<Vec<Subject>>(backend, "subjects/", Some(course_query.as_str()), &cookie.0),
    );
    let slots = slots?;

    let mut subject_cache = SubjectCache::default();
    subject_cache.fill(subjects?);

    Ok(Json(build_view(&slots, &subject_cache)))
}

pub(crate) fn build_view(slots: &[TimetableSlot], subjects: &SubjectCache) -> TimetableView {
    let grid = TimetableGrid::place(slots);

    let rows = TIME_BLOCKS
        .iter()
        .enumerate()
        .map(|(block_idx, block)| GridRow {
            block: block.number,
            range: format!(
                "{:02}:{:02}-{:02}:{:02}",
                block.start / 60,
                block.start % 60,
                block.end / 60,
                block.end % 60
            ),
            days: (0..SCHOOL_DAYS.len())
                .map(|day| {
                    grid.cells[block_idx][day]
                        .iter()
                        .map(|slot| GridCell {
                            subject_id: slot.subject_id,
                            subject_name: subjects.name_of(slot.subject_id).map(str::to_string),
                            start_time: slot.start_time.clone(),
                            end_time: slot.end_time.clone(),
                        })
                        .collect()
                })
                .collect(),
        })
        .collect();

    TimetableView {
        status: list_status(slots),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_resolves_subject_names() {
        let slots = vec![TimetableSlot {
            id: 1,
            course_id: 5,
            subject_id: 9,
            day: "Tuesday".into(),
            start_time: "08:50:00".into(),
            end_time: "10:10:00".into(),
        }];
        let mut subjects = SubjectCache::default();
        subjects.fill(vec![Subject {
            id: 9,
            name: "Física".into(),
            course_id: 5,
            teacher_id: 3,
        }]);

        let view = build_view(&slots, &subjects);
        assert_eq!(view.status, PageStatus::Populated);
        assert_eq!(view.rows.len(), 8);
        assert_eq!(view.rows[0].range, "07:20-08:00");

        // 08:50-10:10 covers blocks 3 and 4 on Tuesday.
        assert_eq!(view.rows[2].days[1].len(), 1);
        assert_eq!(view.rows[3].days[1].len(), 1);
        assert_eq!(
            view.rows[2].days[1][0].subject_name.as_deref(),
            Some("Física")
        );
        assert!(view.rows[4].days[1].is_empty());
    }

    #[test]
    fn test_empty_timetable() {
        let view = build_view(&[], &SubjectCache::default());
        assert_eq!(view.status, PageStatus::Empty);
        assert!(view.rows.iter().all(|row| row.days.iter().all(Vec::is_empty)));
    }
}
