//! Dashboard action forms.
//!
//! One tagged union covers everything a staff role can publish from the
//! dashboard. Each variant validates locally before anything is sent to
//! the backend; a rejected form never produces a backend call.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{conceptual_value, AssessmentKind, GradeType, SubjectMessageKind};

/// Maximum quiz rows a selfassessable exam may carry.
pub const MAX_QUIZ_QUESTIONS: usize = 10;
/// Minimum complete quiz rows required to create a selfassessable exam.
pub const MIN_QUIZ_QUESTIONS: usize = 3;

/// A dashboard action, tagged by kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionForm {
    PublishMessage(MessageForm),
    CreateExam(ExamForm),
    RecordGrade(GradeForm),
    PostSubjectMessage(SubjectMessageForm),
}

/// Message broadcast to a set of courses.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageForm {
    pub title: String,
    pub message: String,
    pub courses: Vec<u64>,
}

/// New assessment; quiz rows are only meaningful for selfassessable exams.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamForm {
    pub subject: u64,
    pub task: String,
    pub due_date: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub correct: Vec<String>,
    #[serde(default)]
    pub incorrect1: Vec<String>,
    #[serde(default)]
    pub incorrect2: Vec<String>,
}

/// New grade for a student, optionally tied to an assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeForm {
    pub subject: u64,
    #[serde(default)]
    pub assessment_id: Option<u64>,
    pub student_id: u64,
    pub grade_type: GradeType,
    pub description: String,
    /// Raw input: a number for numerical/percentage grades, a lexicon word
    /// for conceptual ones
    pub grade: String,
}

/// New message inside a subject.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectMessageForm {
    pub subject_id: u64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SubjectMessageKind,
}

/// A validated form ready to relay: backend path plus encoded body.
#[derive(Debug, Clone)]
pub struct Submission {
    pub path: &'static str,
    pub body: SubmissionBody,
}

#[derive(Debug, Clone)]
pub enum SubmissionBody {
    Json(Value),
    /// Field list for endpoints that only accept multipart form data.
    Form(Vec<(&'static str, String)>),
}

impl ActionForm {
    /// Validate and turn the form into its backend submission.
    pub fn into_submission(self) -> Result<Submission, AppError> {
        match self {
            ActionForm::PublishMessage(form) => form.into_submission(),
            ActionForm::CreateExam(form) => form.into_submission(),
            ActionForm::RecordGrade(form) => form.into_submission(),
            ActionForm::PostSubjectMessage(form) => form.into_submission(),
        }
    }
}

impl MessageForm {
    fn into_submission(self) -> Result<Submission, AppError> {
        if self.title.trim().is_empty() || self.message.trim().is_empty() {
            return Err(AppError::Validation(
                "Title and message are required".to_string(),
            ));
        }
        if self.courses.is_empty() {
            return Err(AppError::Validation(
                "Select at least one course".to_string(),
            ));
        }

        // The backend takes the course list as one comma-separated field.
        let courses = self
            .courses
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        Ok(Submission {
            path: "messages/",
            body: SubmissionBody::Json(json!({
                "title": self.title,
                "message": self.message,
                "courses": courses,
            })),
        })
    }
}

impl ExamForm {
    fn into_submission(self) -> Result<Submission, AppError> {
        if self.task.trim().is_empty() || self.due_date.trim().is_empty() {
            return Err(AppError::Validation(
                "Task name and due date are required".to_string(),
            ));
        }

        let newtask = json!({
            "subject": self.subject,
            "task": self.task,
            "due_date": self.due_date,
            "type": self.kind,
        });

        if self.kind != AssessmentKind::Selfassessable {
            return Ok(Submission {
                path: "assessments/",
                body: SubmissionBody::Json(json!({ "newtask": newtask })),
            });
        }

        // A quiz row counts only when all four fields are filled; incomplete
        // rows are dropped from the payload.
        let complete: Vec<usize> = (0..self.questions.len().min(MAX_QUIZ_QUESTIONS))
            .filter(|&i| self.row_complete(i))
            .collect();
        if complete.len() < MIN_QUIZ_QUESTIONS {
            return Err(AppError::Validation(format!(
                "A quiz needs at least {} complete questions ({} provided)",
                MIN_QUIZ_QUESTIONS,
                complete.len()
            )));
        }

        let pick = |source: &[String]| -> Vec<String> {
            complete.iter().map(|&i| source[i].clone()).collect()
        };

        Ok(Submission {
            path: "assessments/",
            body: SubmissionBody::Json(json!({
                "newtask": newtask,
                "newselfassessable": {
                    "questions": pick(&self.questions),
                    "correct": pick(&self.correct),
                    "incorrect1": pick(&self.incorrect1),
                    "incorrect2": pick(&self.incorrect2),
                },
            })),
        })
    }

    fn row_complete(&self, i: usize) -> bool {
        [&self.questions, &self.correct, &self.incorrect1, &self.incorrect2]
            .iter()
            .all(|field| field.get(i).is_some_and(|v| !v.trim().is_empty()))
    }
}

impl GradeForm {
    fn into_submission(self) -> Result<Submission, AppError> {
        if self.description.trim().is_empty() || self.grade.trim().is_empty() {
            return Err(AppError::Validation(
                "Description and grade are required".to_string(),
            ));
        }

        let grade_value = match self.grade_type {
            GradeType::Numerical => {
                let value: f64 = self.grade.trim().parse().map_err(|_| {
                    AppError::Validation("Grade must be a number between 1 and 10".to_string())
                })?;
                if !(1.0..=10.0).contains(&value) {
                    return Err(AppError::Validation(
                        "Grade must be a number between 1 and 10".to_string(),
                    ));
                }
                value
            }
            GradeType::Percentage => {
                let value: f64 = self.grade.trim().parse().map_err(|_| {
                    AppError::Validation("Percentage must be a number between 0 and 100".to_string())
                })?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(AppError::Validation(
                        "Percentage must be a number between 0 and 100".to_string(),
                    ));
                }
                value
            }
            GradeType::Conceptual => conceptual_value(&self.grade).ok_or_else(|| {
                AppError::Validation(
                    "Conceptual grade must be one of: excelente, muy bueno, bueno, \
                     satisfactorio, regular, insuficiente"
                        .to_string(),
                )
            })?,
        };

        // Percentage is a legacy alias; it submits as a numerical grade.
        let grade_type = match self.grade_type {
            GradeType::Percentage => GradeType::Numerical,
            other => other,
        };

        Ok(Submission {
            path: "grades/",
            body: SubmissionBody::Json(json!({
                "subject": self.subject,
                "assessment_id": self.assessment_id,
                "student_id": self.student_id,
                "grade_type": grade_type,
                "description": self.description,
                "grade": grade_value,
            })),
        })
    }
}

impl SubjectMessageForm {
    fn into_submission(self) -> Result<Submission, AppError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let kind = match self.kind {
            SubjectMessageKind::Message => "message",
            SubjectMessageKind::Link => "link",
            SubjectMessageKind::File => "file",
        };

        // The subject-messages endpoint only speaks multipart form data;
        // file payloads ride the raw proxy relay instead of this form.
        Ok(Submission {
            path: "subject_messages/",
            body: SubmissionBody::Form(vec![
                ("subject_id", self.subject_id.to_string()),
                ("title", self.title),
                ("content", self.content),
                ("type", kind.to_string()),
            ]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade_form(grade_type: GradeType, grade: &str) -> GradeForm {
        GradeForm {
            subject: 3,
            assessment_id: Some(7),
            student_id: 12,
            grade_type,
            description: "Trimestre 1".to_string(),
            grade: grade.to_string(),
        }
    }

    #[test]
    fn test_numerical_grade_bounds() {
        assert!(grade_form(GradeType::Numerical, "7.5").into_submission().is_ok());
        assert!(grade_form(GradeType::Numerical, "0.5").into_submission().is_err());
        assert!(grade_form(GradeType::Numerical, "11").into_submission().is_err());
        assert!(grade_form(GradeType::Numerical, "diez").into_submission().is_err());
    }

    #[test]
    fn test_percentage_grade_bounds_and_normalization() {
        let submission = grade_form(GradeType::Percentage, "85")
            .into_submission()
            .unwrap();
        let SubmissionBody::Json(body) = submission.body else {
            panic!("expected json body");
        };
        assert_eq!(body["grade_type"], "numerical");
        assert_eq!(body["grade"], 85.0);

        assert!(grade_form(GradeType::Percentage, "101").into_submission().is_err());
        assert!(grade_form(GradeType::Percentage, "-1").into_submission().is_err());
    }

    #[test]
    fn test_conceptual_grade_lexicon() {
        let submission = grade_form(GradeType::Conceptual, " Muy Bueno ")
            .into_submission()
            .unwrap();
        let SubmissionBody::Json(body) = submission.body else {
            panic!("expected json body");
        };
        assert_eq!(body["grade"], 9.0);
        assert_eq!(body["grade_type"], "conceptual");

        assert!(grade_form(GradeType::Conceptual, "brillante").into_submission().is_err());
    }

    fn quiz_form(rows: usize) -> ExamForm {
        ExamForm {
            subject: 4,
            task: "Quiz unidad 2".to_string(),
            due_date: "2024-09-01".to_string(),
            kind: AssessmentKind::Selfassessable,
            questions: (0..rows).map(|i| format!("q{}", i)).collect(),
            correct: (0..rows).map(|i| format!("c{}", i)).collect(),
            incorrect1: (0..rows).map(|i| format!("x{}", i)).collect(),
            incorrect2: (0..rows).map(|i| format!("y{}", i)).collect(),
        }
    }

    #[test]
    fn test_quiz_needs_three_complete_rows() {
        assert!(quiz_form(2).into_submission().is_err());
        assert!(quiz_form(3).into_submission().is_ok());
    }

    #[test]
    fn test_quiz_drops_incomplete_rows() {
        let mut form = quiz_form(5);
        form.correct[1].clear();
        let submission = form.into_submission().unwrap();
        let SubmissionBody::Json(body) = submission.body else {
            panic!("expected json body");
        };
        let questions = body["newselfassessable"]["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 4);
        assert!(!questions.iter().any(|q| q == "q1"));
    }

    #[test]
    fn test_plain_exam_has_no_quiz_payload() {
        let mut form = quiz_form(0);
        form.kind = AssessmentKind::Homework;
        let submission = form.into_submission().unwrap();
        let SubmissionBody::Json(body) = submission.body else {
            panic!("expected json body");
        };
        assert_eq!(body["newtask"]["type"], "homework");
        assert!(body.get("newselfassessable").is_none());
    }

    #[test]
    fn test_message_courses_serialize_comma_separated() {
        let form = MessageForm {
            title: "Acto".to_string(),
            message: "Feriado el lunes".to_string(),
            courses: vec![1, 2, 5],
        };
        let SubmissionBody::Json(body) = form.into_submission().unwrap().body else {
            panic!("expected json body");
        };
        assert_eq!(body["courses"], "1,2,5");
    }

    #[test]
    fn test_message_requires_courses() {
        let form = MessageForm {
            title: "Acto".to_string(),
            message: "Feriado".to_string(),
            courses: vec![],
        };
        assert!(form.into_submission().is_err());
    }

    #[test]
    fn test_tagged_union_deserializes() {
        let json = r#"{"action":"record_grade","subject":3,"student_id":12,
            "grade_type":"numerical","description":"Oral","grade":"8"}"#;
        let form: ActionForm = serde_json::from_str(json).unwrap();
        assert!(matches!(form, ActionForm::RecordGrade(_)));
    }
}
