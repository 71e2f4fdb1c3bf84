//! Progress reporting and study-time handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::progress;
use crate::state::AppState;
use crate::storage::{self, try_lock};

use super::{save_or_warn, storage_unavailable};

/// GET /api/progress
pub async fn progress_report(State(state): State<AppState>) -> Response {
  let (Ok(scheduler), Ok(ledger)) = (state.scheduler.lock(), state.ledger.lock()) else {
    return storage_unavailable();
  };

  Json(progress::report(&state.catalog, &scheduler, &ledger)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct StudyTimeRequest {
  pub seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct StudyTimeResponse {
  pub total_study_seconds: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
}

/// POST /api/progress/study-time
///
/// Called by the UI when a study timer pauses or resets; the core only
/// accumulates the elapsed seconds.
pub async fn add_study_time(
  State(state): State<AppState>,
  Json(request): Json<StudyTimeRequest>,
) -> Response {
  let Ok(conn) = try_lock(&state.db) else {
    return storage_unavailable();
  };
  let Ok(mut ledger) = state.ledger.lock() else {
    return storage_unavailable();
  };

  ledger.add_study_time(request.seconds);
  let warning = save_or_warn(&conn, storage::KEY_PROGRESS, &*ledger);

  Json(StudyTimeResponse {
    total_study_seconds: ledger.total_study_seconds(),
    warning,
  })
  .into_response()
}
