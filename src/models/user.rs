//! Users, roles and the father/child mapping.

use serde::{Deserialize, Serialize};

/// Role of the logged-in user. Gates which portal flows are offered;
/// authorization itself is enforced by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
    Preceptor,
    Father,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Preceptor => "preceptor",
            Role::Father => "father",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            "preceptor" => Some(Role::Preceptor),
            "father" => Some(Role::Father),
            _ => None,
        }
    }

    /// Roles that publish messages, exams and grades from the dashboard.
    pub fn can_publish(&self) -> bool {
        matches!(self, Role::Admin | Role::Teacher | Role::Preceptor)
    }
}

/// Personal data record as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalData {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// Present on a father's record only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

/// Reduced record other users may see (student pickers, child cards).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPersonalData {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// The signed-in user assembled from the personal-data, role and
/// profile-picture fetches.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub full_name: String,
    pub name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

impl UserProfile {
    pub fn assemble(
        personal: PersonalData,
        role: Role,
        photo: Option<String>,
        children: Vec<Child>,
    ) -> Self {
        let mut parts = personal.full_name.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");
        Self {
            full_name: personal.full_name,
            name,
            last_name,
            role,
            photo,
            children,
        }
    }
}

/// A father's child as the backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: u64,
    pub name: String,
    pub last_name: String,
    pub course_id: u64,
}

/// A student entry in a course roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub full_name: String,
    pub course_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Student {
    /// A father's child rendered as a roster entry. The backend never
    /// serves children through the student endpoints, so the record is
    /// synthesized locally.
    pub fn from_child(child: &Child) -> Self {
        Self {
            id: child.id,
            full_name: format!("{} {}", child.name, child.last_name),
            course_id: child.course_id,
            photo: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            Role::Admin,
            Role::Teacher,
            Role::Student,
            Role::Preceptor,
            Role::Father,
        ] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("principal"), None);
    }

    #[test]
    fn test_profile_splits_full_name() {
        let profile = UserProfile::assemble(
            PersonalData {
                full_name: "María del Carmen López".into(),
                phone_number: None,
                address: None,
                birth_date: None,
                children: vec![],
            },
            Role::Teacher,
            None,
            vec![],
        );
        assert_eq!(profile.name, "María");
        assert_eq!(profile.last_name, "del Carmen López");
    }

    #[test]
    fn test_student_from_child() {
        let child = Child {
            id: 12,
            name: "Ana".into(),
            last_name: "Suárez".into(),
            course_id: 5,
        };
        let student = Student::from_child(&child);
        assert_eq!(student.id, 12);
        assert_eq!(student.full_name, "Ana Suárez");
        assert_eq!(student.course_id, 5);
        assert!(student.photo.is_none());
    }
}
