//! Courses and subjects.

use serde::{Deserialize, Serialize};

/// A course (year + division) in either school level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub year: i32,
    pub division: String,
    pub level: String,
    pub shift: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preceptor_id: Option<u64>,
}

impl Course {
    /// Human label for pickers. Years 8 and up belong to secondary school
    /// and renumber from 1; divisions carry level-specific names.
    pub fn label(&self) -> String {
        if self.year >= 8 {
            let division = match self.division.as_str() {
                "1" => "a",
                "2" => "b",
                "3" => "c",
                other => other,
            };
            format!("{}° secundaria {}", self.year - 7, division)
        } else {
            let division = match self.division.as_str() {
                "1" => "Mar",
                "2" => "Gaviota",
                "3" => "Estrella",
                other => other,
            };
            format!("{}° primaria {}", self.year, division)
        }
    }
}

/// A subject taught in a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: u64,
    pub name: String,
    pub course_id: u64,
    #[serde(default)]
    pub teacher_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(year: i32, division: &str) -> Course {
        Course {
            id: 1,
            year,
            division: division.into(),
            level: if year >= 8 { "secondary" } else { "primary" }.into(),
            shift: "morning".into(),
            preceptor_id: None,
        }
    }

    #[test]
    fn test_secondary_label_renumbers_years() {
        assert_eq!(course(8, "1").label(), "1° secundaria a");
        assert_eq!(course(12, "3").label(), "5° secundaria c");
    }

    #[test]
    fn test_primary_label_uses_named_divisions() {
        assert_eq!(course(3, "2").label(), "3° primaria Gaviota");
    }

    #[test]
    fn test_unknown_division_passes_through() {
        assert_eq!(course(9, "7").label(), "2° secundaria 7");
    }
}
