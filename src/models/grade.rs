//! Grades and the conceptual grading lexicon.

use serde::{Deserialize, Serialize};

/// Canonical grade taxonomy. `Percentage` survives only as a legacy alias
/// accepted at the form boundary; submitted payloads normalize it to
/// `Numerical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GradeType {
    Numerical,
    Conceptual,
    Percentage,
}

/// A grade record as served by the backend. `assessment_id` is absent for
/// free-standing grades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: u64,
    pub subject_id: u64,
    #[serde(default)]
    pub assessment_id: Option<u64>,
    pub student_id: u64,
    #[serde(default)]
    pub grade_type: Option<GradeType>,
    pub grade: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Fixed conceptual lexicon with its numeric equivalents.
pub const CONCEPT_SCALE: [(&str, f64); 6] = [
    ("excelente", 10.0),
    ("muy bueno", 9.0),
    ("bueno", 8.0),
    ("satisfactorio", 7.0),
    ("regular", 6.0),
    ("insuficiente", 4.0),
];

/// Numeric value of a conceptual grade, matched case- and
/// whitespace-insensitively. `None` when the word is not in the lexicon.
pub fn conceptual_value(concept: &str) -> Option<f64> {
    let normalized = concept.trim().to_lowercase();
    CONCEPT_SCALE
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_values() {
        assert_eq!(conceptual_value("excelente"), Some(10.0));
        assert_eq!(conceptual_value("  Muy Bueno "), Some(9.0));
        assert_eq!(conceptual_value("INSUFICIENTE"), Some(4.0));
        assert_eq!(conceptual_value("sobresaliente"), None);
    }

    #[test]
    fn test_grade_without_assessment_parses() {
        let json = r#"{"id":1,"subject_id":3,"student_id":12,"grade":7.5,
            "grade_type":"numerical","description":"Oral"}"#;
        let grade: Grade = serde_json::from_str(json).unwrap();
        assert_eq!(grade.assessment_id, None);
        assert_eq!(grade.grade_type, Some(GradeType::Numerical));
    }
}
