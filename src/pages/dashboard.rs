//! Dashboard: who is signed in and what they can do from here.

use axum::{extract::State, response::Response, Json};
use serde::Serialize;
use serde_json::Value;

use super::fetch_role;
use crate::api::relay_response;
use crate::auth::SessionCookie;
use crate::backend::{fetch_json, BackendApi, RelayBody};
use crate::errors::AppError;
use crate::forms::{ActionForm, SubmissionBody};
use crate::models::{Assessment, PersonalData, Role, UserProfile};
use crate::stores::CurrentUserStore;
use crate::AppState;

/// Dashboard actions a publishing role can start.
const PUBLISH_ACTIONS: [&str; 4] = [
    "publish_message",
    "create_exam",
    "record_grade",
    "post_subject_message",
];

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: UserProfile,
    pub actions: Vec<&'static str>,
    /// Assessments shown to students and fathers; empty for staff
    pub upcoming: Vec<Assessment>,
}

/// GET /pages/dashboard - Assemble the signed-in user and their dashboard.
pub async fn dashboard_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
) -> Result<Json<DashboardView>, AppError> {
    let backend = state.backend.as_ref();

    let (personal, role, photo) = tokio::join!(
        fetch_json::<PersonalData>(backend, "personal_data/", None, &cookie.0),
        fetch_role(backend, &cookie),
        fetch_photo(backend, &cookie),
    );
    let personal = personal?;
    let role = role?;

    let children = personal.children.clone();
    let user = UserProfile::assemble(personal, role, photo, children);

    // The store owns the assembled profile for the rest of the page build.
    let mut current_user = CurrentUserStore::default();
    current_user.set(user);

    let upcoming = match role {
        Role::Student | Role::Father => {
            let mut assessments: Vec<Assessment> =
                fetch_json(backend, "assessments/", None, &cookie.0).await?;
            assessments.sort_by(|a, b| a.due_date.cmp(&b.due_date));
            assessments
        }
        _ => Vec::new(),
    };

    let user = current_user
        .get()
        .cloned()
        .ok_or_else(|| AppError::Internal("Current user store is empty".to_string()))?;
    let actions = if role.can_publish() {
        PUBLISH_ACTIONS.to_vec()
    } else {
        Vec::new()
    };

    Ok(Json(DashboardView {
        user,
        actions,
        upcoming,
    }))
}

/// A missing profile picture is an empty state, not an error.
async fn fetch_photo(backend: &dyn BackendApi, cookie: &SessionCookie) -> Option<String> {
    let photo: Value = fetch_json(backend, "profile_pictures/", None, &cookie.0)
        .await
        .ok()?;
    photo
        .get("url")
        .and_then(|url| url.as_str())
        .map(|url| url.to_string())
}

/// POST /pages/dashboard/actions - Validate a dashboard form and submit it.
/// Validation failures never reach the backend.
pub async fn submit_action(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Json(form): Json<ActionForm>,
) -> Response {
    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(err) => return relay_response(Err(err)),
    };

    let body = match submission.body {
        SubmissionBody::Json(value) => RelayBody::Json(value),
        SubmissionBody::Form(fields) => {
            let (content_type, bytes) = encode_form_data(&fields);
            RelayBody::Raw {
                content_type: Some(content_type),
                bytes,
            }
        }
    };

    let result = state
        .backend
        .relay("POST", submission.path, None, Some(&cookie.0), body)
        .await;
    relay_response(result)
}

const FORM_BOUNDARY: &str = "----portal-form-7a3c9d41e5b2";

/// Encode text fields as multipart form data for endpoints that accept
/// nothing else.
fn encode_form_data(fields: &[(&'static str, String)]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", FORM_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", FORM_BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", FORM_BOUNDARY),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_form_data() {
        let (content_type, body) =
            encode_form_data(&[("title", "Tarea".to_string()), ("type", "message".to_string())]);
        assert!(content_type.starts_with("multipart/form-data; boundary="));

        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("name=\"title\"\r\n\r\nTarea\r\n"));
        assert!(text.contains("name=\"type\"\r\n\r\nmessage\r\n"));
        assert!(text.ends_with(&format!("--{}--\r\n", FORM_BOUNDARY)));
    }
}
