//! Quiz handlers: question generation and completion recording.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::progress::{QuizAttempt, ALL_TOPICS_SCOPE};
use crate::quiz::{self, QuizQuestion};
use crate::state::AppState;
use crate::storage::{self, try_lock};

use super::{error_response, save_or_warn, storage_unavailable};

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
  /// Topic to draw from; omit to quiz across the whole corpus
  pub topic_id: Option<String>,
  pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub count: usize,
  pub questions: Vec<QuizQuestion>,
}

/// POST /api/quiz
pub async fn generate_quiz(
  State(state): State<AppState>,
  Json(request): Json<QuizRequest>,
) -> Response {
  if let Some(topic_id) = &request.topic_id {
    if state.catalog.topic(topic_id).is_none() {
      return error_response(StatusCode::NOT_FOUND, "Unknown topic");
    }
  }

  let count = request.count.unwrap_or(config::DEFAULT_QUIZ_COUNT);
  let questions = quiz::generate(
    &state.catalog,
    request.topic_id.as_deref(),
    count,
    &mut rand::rng(),
  );

  Json(QuizResponse {
    count: questions.len(),
    questions,
  })
  .into_response()
}

#[derive(Debug, Deserialize)]
pub struct QuizCompleteRequest {
  /// Scope the attempt under this topic, or under "all" when omitted
  pub topic_id: Option<String>,
  pub correct: usize,
  pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct QuizCompleteResponse {
  pub attempt: QuizAttempt,
  pub passed: bool,
  pub average_score: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
}

/// POST /api/quiz/complete
pub async fn complete_quiz(
  State(state): State<AppState>,
  Json(request): Json<QuizCompleteRequest>,
) -> Response {
  if request.total == 0 || request.correct > request.total {
    return error_response(
      StatusCode::UNPROCESSABLE_ENTITY,
      "correct must be at most total, and total at least 1",
    );
  }

  let Ok(conn) = try_lock(&state.db) else {
    return storage_unavailable();
  };
  let Ok(mut ledger) = state.ledger.lock() else {
    return storage_unavailable();
  };

  let scope = request.topic_id.as_deref().unwrap_or(ALL_TOPICS_SCOPE);
  let attempt = ledger.record_quiz_attempt(scope, request.correct, request.total, Utc::now());
  let warning = save_or_warn(&conn, storage::KEY_PROGRESS, &*ledger);

  Json(QuizCompleteResponse {
    passed: attempt.score >= config::PASSING_SCORE,
    average_score: ledger.average_score(scope).unwrap_or(attempt.score),
    attempt,
    warning,
  })
  .into_response()
}
