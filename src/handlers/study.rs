//! Flashcard study handlers: due set, rapid review and review grading.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::domain::{card_key, ReviewEntry};
use crate::srs::{due_cards, rapid_review_cards, DueCard};
use crate::state::AppState;
use crate::storage::{self, try_lock};

use super::{error_response, save_or_warn, storage_unavailable};

#[derive(Debug, Serialize)]
pub struct DueResponse {
  pub count: usize,
  pub cards: Vec<DueCard>,
}

/// GET /api/study/due
pub async fn due_cards_handler(State(state): State<AppState>) -> Response {
  let Ok(scheduler) = state.scheduler.lock() else {
    return storage_unavailable();
  };

  let cards = due_cards(&state.catalog, &scheduler, Utc::now());
  Json(DueResponse {
    count: cards.len(),
    cards,
  })
  .into_response()
}

/// GET /api/study/rapid
///
/// The due set if any cards are due, otherwise a random sample so the
/// 15-minute session always has material. The countdown itself runs
/// client-side.
pub async fn rapid_review_handler(State(state): State<AppState>) -> Response {
  let Ok(scheduler) = state.scheduler.lock() else {
    return storage_unavailable();
  };

  let cards = rapid_review_cards(&state.catalog, &scheduler, Utc::now(), &mut rand::rng());
  Json(DueResponse {
    count: cards.len(),
    cards,
  })
  .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub topic_id: String,
  pub card_index: usize,
  /// Self-assessed recall, 0-5; >= 3 counts as success
  pub quality: u8,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
  pub entry: ReviewEntry,
  pub study_streak: u32,
  pub due_count: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
}

/// POST /api/study/review
///
/// Records the rating, counts today toward the study streak, and
/// persists scheduler and ledger before responding.
pub async fn submit_review(
  State(state): State<AppState>,
  Json(request): Json<ReviewRequest>,
) -> Response {
  if request.quality > config::MAX_REVIEW_QUALITY {
    return error_response(
      StatusCode::UNPROCESSABLE_ENTITY,
      "quality must be between 0 and 5",
    );
  }
  if state
    .catalog
    .flashcard(&request.topic_id, request.card_index)
    .is_none()
  {
    return error_response(StatusCode::NOT_FOUND, "Unknown card");
  }

  let Ok(conn) = try_lock(&state.db) else {
    return storage_unavailable();
  };
  let (Ok(mut scheduler), Ok(mut ledger)) = (state.scheduler.lock(), state.ledger.lock()) else {
    return storage_unavailable();
  };

  let now = Utc::now();
  let key = card_key(&request.topic_id, request.card_index);
  scheduler.record_review(&key, request.quality, now);
  ledger.record_study_day(now.date_naive());

  let warning = save_or_warn(&conn, storage::KEY_SCHEDULER, scheduler.entries())
    .or(save_or_warn(&conn, storage::KEY_PROGRESS, &*ledger));

  let entry = scheduler
    .entry(&key)
    .cloned()
    .expect("entry exists for validated catalog card");
  let due_count = due_cards(&state.catalog, &scheduler, now).len();

  Json(ReviewResponse {
    entry,
    study_streak: ledger.study_streak(),
    due_count,
    warning,
  })
  .into_response()
}
