//! Owned per-card scheduling state.
//!
//! The scheduler holds one [`ReviewEntry`] per catalog flashcard, keyed
//! by the `{topic_id}_{index}` card key. It never touches storage
//! itself: callers persist the entry map explicitly after a mutating
//! call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::content::Catalog;
use crate::domain::{card_key, truncate_to_millis, ReviewEntry};
use crate::srs::sm2;

#[derive(Debug, Default)]
pub struct Scheduler {
  entries: HashMap<String, ReviewEntry>,
}

impl Scheduler {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rebuild from a persisted entry map.
  pub fn from_entries(entries: HashMap<String, ReviewEntry>) -> Self {
    Self { entries }
  }

  /// Create default entries for catalog cards that have none yet.
  ///
  /// Runs on every startup after loading persisted state, so content
  /// added to the catalog later gets scheduled without discarding
  /// existing progress. Existing entries are never overwritten.
  /// Returns the number of entries added.
  pub fn seed_from_catalog(&mut self, catalog: &Catalog, now: DateTime<Utc>) -> usize {
    let mut added = 0;
    for topic in &catalog.topics {
      for index in 0..topic.flashcards.len() {
        let key = card_key(&topic.id, index);
        if !self.entries.contains_key(&key) {
          self.entries.insert(key, ReviewEntry::new(now));
          added += 1;
        }
      }
    }
    added
  }

  /// Record a quality 0-5 self-rating for a card.
  ///
  /// Unknown keys are ignored: after startup seeding every catalog card
  /// has an entry, so a miss can only come from a stale client.
  pub fn record_review(&mut self, key: &str, quality: u8, now: DateTime<Utc>) {
    let Some(entry) = self.entries.get_mut(key) else {
      tracing::debug!("review for unknown card key {key}, ignoring");
      return;
    };

    let now = truncate_to_millis(now);
    entry.total_reviews += 1;
    entry.last_reviewed = Some(now);

    let result = sm2::calculate_review(
      quality,
      entry.ease_factor,
      entry.interval_days,
      entry.repetitions,
      now,
    );
    entry.ease_factor = result.ease_factor;
    entry.interval_days = result.interval_days;
    entry.repetitions = result.repetitions;
    entry.next_review = result.next_review;
  }

  pub fn entry(&self, key: &str) -> Option<&ReviewEntry> {
    self.entries.get(key)
  }

  pub fn entries(&self) -> &HashMap<String, ReviewEntry> {
    &self.entries
  }

  /// Replace all entries, e.g. when restoring a backup.
  pub fn replace_entries(&mut self, entries: HashMap<String, ReviewEntry>) {
    self.entries = entries;
  }

  /// Count of catalog cards in `topic_id` that have been reviewed at
  /// least once.
  pub fn reviewed_in_topic(&self, topic_id: &str, card_count: usize) -> usize {
    (0..card_count)
      .filter(|&index| {
        self
          .entry(&card_key(topic_id, index))
          .is_some_and(ReviewEntry::is_reviewed)
      })
      .count()
  }

  pub fn reviewed_count(&self) -> usize {
    self.entries.values().filter(|e| e.is_reviewed()).count()
  }
}
