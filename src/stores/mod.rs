//! Client-state containers.
//!
//! The portal keeps three small pieces of page state between fetches:
//! the current user, a father's selected child, and the last subject
//! list. Each is an explicit object owned by the page context that
//! created it; writes are last-write-wins and nothing is evicted.

use crate::models::{Child, Subject, UserProfile};

/// The signed-in user as assembled by the dashboard fetches.
#[derive(Debug, Default)]
pub struct CurrentUserStore {
    user: Option<UserProfile>,
}

impl CurrentUserStore {
    pub fn set(&mut self, user: UserProfile) {
        self.user = Some(user);
    }

    pub fn get(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

/// Which child a father is currently looking at.
#[derive(Debug, Default)]
pub struct ChildSelectionStore {
    selected: Option<Child>,
}

impl ChildSelectionStore {
    pub fn select(&mut self, child: Child) {
        self.selected = Some(child);
    }

    pub fn selected(&self) -> Option<&Child> {
        self.selected.as_ref()
    }
}

/// Last fetched subject list, used to resolve subject names across pages.
#[derive(Debug, Default)]
pub struct SubjectCache {
    subjects: Vec<Subject>,
}

impl SubjectCache {
    pub fn fill(&mut self, subjects: Vec<Subject>) {
        self.subjects = subjects;
    }

    pub fn name_of(&self, subject_id: u64) -> Option<&str> {
        self.subjects
            .iter()
            .find(|s| s.id == subject_id)
            .map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: u64, name: &str, course_id: u64) -> Subject {
        Subject {
            id,
            name: name.into(),
            course_id,
            teacher_id: 1,
        }
    }

    #[test]
    fn test_subject_cache_lookup() {
        let mut cache = SubjectCache::default();
        cache.fill(vec![subject(1, "Matemática", 5), subject(2, "Lengua", 6)]);

        assert_eq!(cache.name_of(1), Some("Matemática"));
        assert_eq!(cache.name_of(99), None);
        assert_eq!(cache.name_of(2), Some("Lengua"));
    }

    #[test]
    fn test_subject_cache_last_write_wins() {
        let mut cache = SubjectCache::default();
        cache.fill(vec![subject(1, "Matemática", 5)]);
        cache.fill(vec![subject(2, "Historia", 5)]);

        assert_eq!(cache.name_of(1), None);
        assert_eq!(cache.name_of(2), Some("Historia"));
    }

    #[test]
    fn test_child_selection_last_write_wins() {
        let mut store = ChildSelectionStore::default();
        assert!(store.selected().is_none());

        let child = |id: u64| Child {
            id,
            name: "Ana".into(),
            last_name: "Suárez".into(),
            course_id: 5,
        };
        store.select(child(12));
        store.select(child(13));
        assert_eq!(store.selected().map(|c| c.id), Some(13));
    }
}
