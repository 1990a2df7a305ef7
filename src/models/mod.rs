//! Record types for backend-owned data the portal displays or edits.
//!
//! The backend owns every lifecycle; these types are the parsed snapshot
//! of its JSON responses plus the request bodies the portal submits.

mod assessment;
mod course;
mod grade;
mod message;
mod timetable;
mod user;

pub use assessment::*;
pub use course::*;
pub use grade::*;
pub use message::*;
pub use timetable::*;
pub use user::*;
