//! Page view models.
//!
//! Each page route aggregates the backend fetches its page needs,
//! resolves names and groupings, and answers with a JSON view model.
//! Independent fetches run concurrently; a failed fetch ends the page
//! build (no retries), except for profile pictures, where a miss is an
//! empty state.

mod dashboard;
mod exams;
mod grades;
mod messages;
mod profile;
mod subjects;
mod timetable;

pub use dashboard::*;
pub use exams::*;
pub use grades::*;
pub use messages::*;
pub use profile::*;
pub use subjects::*;
pub use timetable::*;

use serde::Serialize;

use crate::auth::SessionCookie;
use crate::backend::{fetch_json, BackendApi};
use crate::errors::AppError;
use crate::models::Role;

/// Whether a page has anything to show.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Populated,
    Empty,
}

pub(crate) fn list_status<T>(items: &[T]) -> PageStatus {
    if items.is_empty() {
        PageStatus::Empty
    } else {
        PageStatus::Populated
    }
}

/// The role the backend recorded for this session.
pub(crate) async fn fetch_role(
    backend: &dyn BackendApi,
    cookie: &SessionCookie,
) -> Result<Role, AppError> {
    let role: String = fetch_json(backend, "role/", None, &cookie.0).await?;
    Role::from_str(&role)
        .ok_or_else(|| AppError::Upstream(format!("Backend reported unknown role: {}", role)))
}
