//! Role-driven course/student selection flow.
//!
//! Staff walk course → student → resource. Students have no selection to
//! make and start at the resource. Fathers pick among their children
//! (which stands in for the student step); a single child skips straight
//! to the resource.

use crate::errors::AppError;
use crate::models::{Child, Role};

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStep {
    Course,
    Student,
    Resource,
}

/// User-driven events moving the selection.
#[derive(Debug, Clone, Copy)]
pub enum SelectionEvent {
    CourseChosen(u64),
    StudentChosen(u64),
    Back,
}

/// The selection flow for one page visit.
#[derive(Debug, Clone)]
pub struct SelectionFlow {
    role: Role,
    step: SelectionStep,
    multiple_children: bool,
    selected_course: Option<u64>,
    selected_student: Option<u64>,
}

impl SelectionFlow {
    /// Starting step and selections for a role. Fathers seed their
    /// selection from the children list; everyone else starts clean.
    pub fn start(role: Role, children: &[Child]) -> Self {
        match role {
            Role::Student => Self {
                role,
                step: SelectionStep::Resource,
                multiple_children: false,
                selected_course: None,
                selected_student: None,
            },
            Role::Father => match children {
                [only] => Self {
                    role,
                    step: SelectionStep::Resource,
                    multiple_children: false,
                    selected_course: Some(only.course_id),
                    selected_student: Some(only.id),
                },
                _ => Self {
                    role,
                    step: SelectionStep::Student,
                    multiple_children: children.len() > 1,
                    selected_course: None,
                    selected_student: None,
                },
            },
            _ => Self {
                role,
                step: SelectionStep::Course,
                multiple_children: false,
                selected_course: None,
                selected_student: None,
            },
        }
    }

    pub fn step(&self) -> SelectionStep {
        self.step
    }

    pub fn selected_course(&self) -> Option<u64> {
        self.selected_course
    }

    pub fn selected_student(&self) -> Option<u64> {
        self.selected_student
    }

    /// Apply one event. The transition table is keyed by
    /// (current step, event, role); anything not listed is rejected.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<(), AppError> {
        use SelectionEvent::*;
        use SelectionStep::*;

        match (self.step, event, self.role) {
            (Course, CourseChosen(id), Role::Admin | Role::Teacher | Role::Preceptor) => {
                self.selected_course = Some(id);
                self.selected_student = None;
                self.step = Student;
                Ok(())
            }
            (Student, StudentChosen(id), Role::Admin | Role::Teacher | Role::Preceptor) => {
                self.selected_student = Some(id);
                self.step = Resource;
                Ok(())
            }
            // A father's child choice is the student step.
            (Student, StudentChosen(id), Role::Father) => {
                self.selected_student = Some(id);
                self.step = Resource;
                Ok(())
            }
            (Resource, Back, Role::Admin | Role::Teacher | Role::Preceptor) => {
                self.selected_student = None;
                self.step = Student;
                Ok(())
            }
            (Resource, Back, Role::Father) if self.multiple_children => {
                self.selected_student = None;
                self.step = Student;
                Ok(())
            }
            (Student, Back, Role::Admin | Role::Teacher | Role::Preceptor) => {
                self.selected_course = None;
                self.selected_student = None;
                self.step = Course;
                Ok(())
            }
            _ => Err(AppError::Validation(format!(
                "No {:?} transition from the {:?} step for role {}",
                event,
                self.step,
                self.role.as_str()
            ))),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(id: u64, course_id: u64) -> Child {
        Child {
            id,
            name: "Mia".into(),
            last_name: "Paz".into(),
            course_id,
        }
    }

    #[test]
    fn test_student_starts_at_resource() {
        let flow = SelectionFlow::start(Role::Student, &[]);
        assert_eq!(flow.step(), SelectionStep::Resource);
        assert_eq!(flow.selected_student(), None);
    }

    #[test]
    fn test_father_with_one_child_skips_to_resource() {
        let flow = SelectionFlow::start(Role::Father, &[child(12, 5)]);
        assert_eq!(flow.step(), SelectionStep::Resource);
        assert_eq!(flow.selected_course(), Some(5));
        assert_eq!(flow.selected_student(), Some(12));
    }

    #[test]
    fn test_father_with_two_children_chooses() {
        let mut flow = SelectionFlow::start(Role::Father, &[child(12, 5), child(13, 6)]);
        assert_eq!(flow.step(), SelectionStep::Student);
        flow.apply(SelectionEvent::StudentChosen(13)).unwrap();
        assert_eq!(flow.step(), SelectionStep::Resource);
        assert_eq!(flow.selected_student(), Some(13));
        // Back returns to the child choice.
        flow.apply(SelectionEvent::Back).unwrap();
        assert_eq!(flow.step(), SelectionStep::Student);
        assert_eq!(flow.selected_student(), None);
    }

    #[test]
    fn test_teacher_walks_forward_and_back() {
        let mut flow = SelectionFlow::start(Role::Teacher, &[]);
        assert_eq!(flow.step(), SelectionStep::Course);

        flow.apply(SelectionEvent::CourseChosen(5)).unwrap();
        assert_eq!(flow.step(), SelectionStep::Student);
        assert_eq!(flow.selected_course(), Some(5));

        flow.apply(SelectionEvent::StudentChosen(12)).unwrap();
        assert_eq!(flow.step(), SelectionStep::Resource);

        flow.apply(SelectionEvent::Back).unwrap();
        assert_eq!(flow.step(), SelectionStep::Student);
        assert_eq!(flow.selected_student(), None);
        assert_eq!(flow.selected_course(), Some(5));

        flow.apply(SelectionEvent::Back).unwrap();
        assert_eq!(flow.step(), SelectionStep::Course);
        assert_eq!(flow.selected_course(), None);
    }

    #[test]
    fn test_choosing_a_new_course_clears_the_student() {
        let mut flow = SelectionFlow::start(Role::Preceptor, &[]);
        flow.apply(SelectionEvent::CourseChosen(5)).unwrap();
        flow.apply(SelectionEvent::StudentChosen(12)).unwrap();
        flow.apply(SelectionEvent::Back).unwrap();
        flow.apply(SelectionEvent::Back).unwrap();
        flow.apply(SelectionEvent::CourseChosen(6)).unwrap();
        assert_eq!(flow.selected_student(), None);
        assert_eq!(flow.selected_course(), Some(6));
    }

    #[test]
    fn test_invalid_transition_is_rejected() {
        let mut flow = SelectionFlow::start(Role::Student, &[]);
        assert!(flow.apply(SelectionEvent::CourseChosen(1)).is_err());

        let mut flow = SelectionFlow::start(Role::Teacher, &[]);
        assert!(flow.apply(SelectionEvent::StudentChosen(1)).is_err());
        assert!(flow.apply(SelectionEvent::Back).is_err());
    }
}
