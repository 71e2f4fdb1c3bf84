//! Preference handlers.
//!
//! The server stores preferences verbatim; applying them (theme,
//! contrast, timer durations) is the UI's business.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::Preferences;
use crate::state::AppState;
use crate::storage::{self, try_lock};

use super::{save_or_warn, storage_unavailable};

/// GET /api/preferences
pub async fn get_preferences(State(state): State<AppState>) -> Response {
    let Ok(preferences) = state.preferences.lock() else {
        return storage_unavailable();
    };
    Json(preferences.clone()).into_response()
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Preferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// PUT /api/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(updated): Json<Preferences>,
) -> Response {
    let Ok(conn) = try_lock(&state.db) else {
        return storage_unavailable();
    };
    let Ok(mut preferences) = state.preferences.lock() else {
        return storage_unavailable();
    };

    *preferences = updated;
    let warning = save_or_warn(&conn, storage::KEY_PREFERENCES, &*preferences);

    Json(PreferencesResponse {
        preferences: preferences.clone(),
        warning,
    })
    .into_response()
}
