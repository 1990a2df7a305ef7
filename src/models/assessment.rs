//! Assessments (exams, homework, quizzes) and their due-date status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assessment kind. `Selfassessable` is the embedded multiple-choice quiz.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Exam,
    Homework,
    Project,
    Oral,
    Remedial,
    Selfassessable,
}

/// An assessment record. The question/answer arrays are only present on
/// the selfassessable variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: u64,
    pub subject_id: u64,
    pub task: String,
    /// ISO date (`YYYY-MM-DD`), relayed as the backend sends it
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect1: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect2: Option<Vec<String>>,
}

/// Where an assessment sits relative to a reference day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    Upcoming,
    Today,
    Past,
}

impl Assessment {
    /// Date-only comparison against `today`; `None` when the backend sent
    /// an unparseable date.
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        let due = NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok()?;
        Some(if due > today {
            DueStatus::Upcoming
        } else if due == today {
            DueStatus::Today
        } else {
            DueStatus::Past
        })
    }
}
