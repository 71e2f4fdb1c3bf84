//! Catalog listing and cheat-sheet handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::config;
use crate::domain::{card_key, ScheduleSlot};
use crate::srs::{hardest_cards, RankedCard};
use crate::state::AppState;

use super::storage_unavailable;

#[derive(Debug, Serialize)]
pub struct TopicSummary {
  pub id: String,
  pub title: String,
  pub summary: String,
  pub card_count: usize,
  pub due_count: usize,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
  pub title: String,
  pub topics: Vec<TopicSummary>,
  pub schedule: Vec<ScheduleSlot>,
}

/// GET /api/topics
pub async fn list_topics(State(state): State<AppState>) -> Response {
  let Ok(scheduler) = state.scheduler.lock() else {
    return storage_unavailable();
  };
  let now = Utc::now();

  let topics = state
    .catalog
    .topics
    .iter()
    .map(|topic| {
      let due_count = (0..topic.flashcards.len())
        .filter(|&index| {
          scheduler
            .entry(&card_key(&topic.id, index))
            .is_some_and(|e| e.is_due(now))
        })
        .count();
      TopicSummary {
        id: topic.id.clone(),
        title: topic.title.clone(),
        summary: topic.summary.clone(),
        card_count: topic.flashcards.len(),
        due_count,
      }
    })
    .collect();

  Json(TopicsResponse {
    title: state.catalog.title.clone(),
    topics,
    schedule: state.catalog.schedule.clone(),
  })
  .into_response()
}

#[derive(Debug, Serialize)]
pub struct CheatsheetTopic {
  pub title: String,
  pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct CheatsheetResponse {
  pub topics: Vec<CheatsheetTopic>,
  /// Hardest cards first, capped at ten
  pub cards: Vec<RankedCard>,
}

/// GET /api/cheatsheet
///
/// Data for the UI's printable study notes: topic summaries plus the
/// cards the user struggles with most.
pub async fn cheatsheet(State(state): State<AppState>) -> Response {
  let Ok(scheduler) = state.scheduler.lock() else {
    return storage_unavailable();
  };

  let cards = hardest_cards(&state.catalog, &scheduler, config::CHEATSHEET_CARD_COUNT);
  let topics = state
    .catalog
    .topics
    .iter()
    .map(|t| CheatsheetTopic {
      title: t.title.clone(),
      summary: t.summary.clone(),
    })
    .collect();

  Json(CheatsheetResponse { topics, cards }).into_response()
}
