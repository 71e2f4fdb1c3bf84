use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Initial ease factor for a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Per-card scheduling state, one entry per flashcard in the catalog.
///
/// Timestamps are held at whole-millisecond precision so the persisted
/// JSON representation (epoch milliseconds) round-trips exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
  /// Interval growth multiplier, never below 1.3.
  pub ease_factor: f64,
  /// Days until the next review.
  pub interval_days: i64,
  /// Consecutive successful (quality >= 3) reviews.
  pub repetitions: i64,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub next_review: DateTime<Utc>,
  #[serde(with = "chrono::serde::ts_milliseconds_option")]
  pub last_reviewed: Option<DateTime<Utc>>,
  /// All reviews ever recorded, successful or not.
  pub total_reviews: i64,
}

impl ReviewEntry {
  /// Default entry for a card first seen at `now`: due immediately.
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      ease_factor: INITIAL_EASE_FACTOR,
      interval_days: 1,
      repetitions: 0,
      next_review: truncate_to_millis(now),
      last_reviewed: None,
      total_reviews: 0,
    }
  }

  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.next_review <= now
  }

  pub fn is_reviewed(&self) -> bool {
    self.total_reviews > 0
  }

  /// Difficulty score used for the cheat-sheet ranking: low ease reads
  /// as hard, so invert around the 0..6 quality scale.
  pub fn difficulty(&self) -> f64 {
    6.0 - self.ease_factor
  }
}

/// Drop sub-millisecond precision from a timestamp.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
  DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
