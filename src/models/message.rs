//! Course-wide and per-subject messages.

use serde::{Deserialize, Serialize};

/// A message broadcast to one or more courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub sender_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Kind of a subject message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubjectMessageKind {
    Message,
    Link,
    File,
}

/// A message posted inside a subject (plain text, link, or uploaded file).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectMessage {
    pub id: u64,
    pub sender_id: u64,
    pub subject_id: u64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SubjectMessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
