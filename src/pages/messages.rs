//! Messages page: course broadcasts plus one subject's thread.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::PageStatus;
use crate::auth::SessionCookie;
use crate::backend::fetch_json;
use crate::errors::AppError;
use crate::models::{Message, SubjectMessage};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub subject_id: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MessagesView {
    pub status: PageStatus,
    pub messages: Vec<Message>,
    pub subject_messages: Vec<SubjectMessage>,
}

/// GET /pages/messages - Course messages, and the selected subject's
/// messages when `subject_id` is given.
pub async fn messages_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<MessagesView>, AppError> {
    let backend = state.backend.as_ref();

    let messages_fut = fetch_json::<Vec<Message>>(backend, "messages/", None, &cookie.0);

    let (mut messages, subject_messages) = match query.subject_id {
        Some(subject_id) => {
            let subject_query = format!("subject_id={}", subject_id);
            let (messages, subject_messages) = tokio::join!(
                messages_fut,
                fetch_json::<Vec<SubjectMessage>>(
                    backend,
                    "subject_messages/",
                    Some(subject_query.as_str()),
                    &cookie.0,
                ),
            );
            (messages?, subject_messages?)
        }
        None => (messages_fut.await?, Vec::new()),
    };

    // Newest first, as the inbox shows them.
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let status = if messages.is_empty() && subject_messages.is_empty() {
        PageStatus::Empty
    } else {
        PageStatus::Populated
    };

    Ok(Json(MessagesView {
        status,
        messages,
        subject_messages,
    }))
}
