//! Profile page: personal data and photo.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::auth::SessionCookie;
use crate::backend::{fetch_json, RelayBody};
use crate::errors::AppError;
use crate::models::PersonalData;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub personal: PersonalData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// GET /pages/profile - Personal data and profile picture together.
/// A missing picture (backend 404) renders as no photo, not a failure.
pub async fn profile_page(
    State(state): State<AppState>,
    cookie: SessionCookie,
) -> Result<Json<ProfileView>, AppError> {
    let backend = state.backend.as_ref();

    let (personal, photo) = tokio::join!(
        fetch_json::<PersonalData>(backend, "personal_data/", None, &cookie.0),
        backend.relay("GET", "profile_pictures/", None, Some(&cookie.0), RelayBody::Empty),
    );
    let personal = personal?;

    let photo = photo
        .ok()
        .filter(|response| response.status.is_success())
        .and_then(|response| response.json().ok())
        .and_then(|body: Value| {
            body.get("url")
                .and_then(|url| url.as_str())
                .map(|url| url.to_string())
        });

    Ok(Json(ProfileView { personal, photo }))
}
