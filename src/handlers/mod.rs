//! JSON API handlers for the browser UI.
//!
//! Handlers own the clock and the random source: core functions receive
//! `Utc::now()` and an `rng` explicitly. Every mutating handler
//! persists the touched structure before responding; a failed write
//! keeps the in-memory state and surfaces a warning instead of failing
//! the request.

mod backup;
mod progress;
mod quiz;
mod settings;
mod study;
mod topics;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rusqlite::Connection;
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::storage;

pub use backup::{export_state, import_state};
pub use progress::{add_study_time, progress_report};
pub use quiz::{complete_quiz, generate_quiz};
pub use settings::{get_preferences, update_preferences};
pub use study::{due_cards_handler, rapid_review_handler, submit_review, ReviewRequest};
pub use topics::{cheatsheet, list_topics};

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/topics", get(list_topics))
    .route("/api/cheatsheet", get(cheatsheet))
    .route("/api/study/due", get(due_cards_handler))
    .route("/api/study/rapid", get(rapid_review_handler))
    .route("/api/study/review", post(submit_review))
    .route("/api/quiz", post(generate_quiz))
    .route("/api/quiz/complete", post(complete_quiz))
    .route("/api/progress", get(progress_report))
    .route("/api/progress/study-time", post(add_study_time))
    .route(
      "/api/preferences",
      get(get_preferences).put(update_preferences),
    )
    .route("/api/export", get(export_state))
    .route("/api/import", post(import_state))
    .nest_service("/static", ServeDir::new("static"))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
  (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// 500 response for an unavailable store (poisoned lock).
pub(crate) fn storage_unavailable() -> Response {
  error_response(StatusCode::INTERNAL_SERVER_ERROR, "Storage unavailable")
}

/// Persist `value` under `key`, mapping a write failure to the warning
/// string mutation responses carry. The in-memory state stays intact
/// either way; only durability is at risk.
pub(crate) fn save_or_warn<T: Serialize>(
  conn: &Connection,
  key: &str,
  value: &T,
) -> Option<String> {
  match storage::save_json(conn, key, value) {
    Ok(()) => None,
    Err(e) => {
      tracing::warn!("failed to persist '{}': {}", key, e);
      Some("Failed to save progress; recent changes may be lost".to_string())
    }
  }
}
