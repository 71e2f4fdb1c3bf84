use chrono::{DateTime, Duration, Utc};

const MIN_EASE_FACTOR: f64 = 1.3;

pub struct Sm2Result {
  pub ease_factor: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
}

/// One SM-2 scheduling step.
///
/// Quality 0-5, where >= 3 counts as a successful recall. On success the
/// interval grows 1 -> 6 -> round(interval * ease); the growth uses the
/// ease factor as it was BEFORE this review's adjustment. On failure the
/// repetition streak and interval reset to 1 day. The ease adjustment
/// itself applies on every review, so repeated failures keep lowering
/// the ease (down to 1.3) even though the interval is already minimal.
pub fn calculate_review(
  quality: u8,
  current_ease_factor: f64,
  current_interval: i64,
  current_repetitions: i64,
  now: DateTime<Utc>,
) -> Sm2Result {
  let (new_interval, new_repetitions) = if quality < 3 {
    // Failed review: reset
    (1, 0)
  } else {
    let interval = match current_repetitions {
      0 => 1,
      1 => 6,
      _ => ((current_interval as f64) * current_ease_factor).round() as i64,
    };
    (interval, current_repetitions + 1)
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3
  let q = quality as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let new_ease_factor = (current_ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  let next_review = now + Duration::days(new_interval);

  Sm2Result {
    ease_factor: new_ease_factor,
    interval_days: new_interval,
    repetitions: new_repetitions,
    next_review,
  }
}
