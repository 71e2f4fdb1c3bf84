//! Due-card selection over the catalog and scheduler state.
//!
//! Pure queries: nothing here mutates the scheduler or touches storage.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config;
use crate::content::Catalog;
use crate::domain::{card_key, ReviewEntry};
use crate::srs::Scheduler;

/// A flashcard due for review, with its topic context and scheduling
/// state attached.
#[derive(Debug, Clone, Serialize)]
pub struct DueCard {
  pub topic_id: String,
  pub topic_title: String,
  pub card_index: usize,
  pub question: String,
  pub answer: String,
  pub entry: ReviewEntry,
}

/// All cards whose next review time has arrived, in catalog order
/// (topic order, then card position). The boundary is inclusive: a card
/// scheduled for exactly `now` is due.
pub fn due_cards(catalog: &Catalog, scheduler: &Scheduler, now: DateTime<Utc>) -> Vec<DueCard> {
  collect_cards(catalog, scheduler, |entry| entry.is_due(now))
}

/// Card selection for a rapid-review session: the due set when there is
/// one, otherwise a random sample across the whole corpus so the
/// session is never empty.
pub fn rapid_review_cards(
  catalog: &Catalog,
  scheduler: &Scheduler,
  now: DateTime<Utc>,
  rng: &mut impl Rng,
) -> Vec<DueCard> {
  let due = due_cards(catalog, scheduler, now);
  if !due.is_empty() {
    return due;
  }

  let mut all = collect_cards(catalog, scheduler, |_| true);
  all.shuffle(rng);
  all.truncate(config::RAPID_REVIEW_CARD_COUNT);
  all
}

/// A card ranked for the printable cheat sheet.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCard {
  pub question: String,
  pub answer: String,
  pub topic_title: String,
  pub reviews: i64,
  pub difficulty: f64,
}

/// The hardest cards in the corpus: ranked by ease-derived difficulty,
/// with heavily-reviewed cards weighted up slightly.
pub fn hardest_cards(catalog: &Catalog, scheduler: &Scheduler, limit: usize) -> Vec<RankedCard> {
  let mut ranked: Vec<RankedCard> = Vec::with_capacity(catalog.total_cards());

  for topic in &catalog.topics {
    for (index, card) in topic.flashcards.iter().enumerate() {
      let (reviews, difficulty) = match scheduler.entry(&card_key(&topic.id, index)) {
        Some(entry) => (entry.total_reviews, entry.difficulty()),
        None => (0, 3.0),
      };
      ranked.push(RankedCard {
        question: card.question.clone(),
        answer: card.answer.clone(),
        topic_title: topic.title.clone(),
        reviews,
        difficulty,
      });
    }
  }

  ranked.sort_by(|a, b| {
    let score_a = a.difficulty + a.reviews as f64 * 0.1;
    let score_b = b.difficulty + b.reviews as f64 * 0.1;
    score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
  });
  ranked.truncate(limit);
  ranked
}

fn collect_cards(
  catalog: &Catalog,
  scheduler: &Scheduler,
  mut include: impl FnMut(&ReviewEntry) -> bool,
) -> Vec<DueCard> {
  let mut cards = Vec::new();
  for topic in &catalog.topics {
    for (index, card) in topic.flashcards.iter().enumerate() {
      let Some(entry) = scheduler.entry(&card_key(&topic.id, index)) else {
        continue;
      };
      if include(entry) {
        cards.push(DueCard {
          topic_id: topic.id.clone(),
          topic_title: topic.title.clone(),
          card_index: index,
          question: card.question.clone(),
          answer: card.answer.clone(),
          entry: entry.clone(),
        });
      }
    }
  }
  cards
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::seed_catalog;
  use chrono::Duration;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn at() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
  }

  fn seeded(catalog: &Catalog) -> Scheduler {
    let mut scheduler = Scheduler::new();
    scheduler.seed_from_catalog(catalog, at());
    scheduler
  }

  #[test]
  fn test_everything_due_after_first_seed() {
    let catalog = seed_catalog();
    let scheduler = seeded(&catalog);

    let due = due_cards(&catalog, &scheduler, at());
    assert_eq!(due.len(), catalog.total_cards());
  }

  #[test]
  fn test_catalog_order_is_stable() {
    let catalog = seed_catalog();
    let scheduler = seeded(&catalog);

    let due = due_cards(&catalog, &scheduler, at());
    let expected: Vec<(String, usize)> = catalog
      .topics
      .iter()
      .flat_map(|t| (0..t.flashcards.len()).map(|i| (t.id.clone(), i)))
      .collect();
    let actual: Vec<(String, usize)> = due
      .iter()
      .map(|c| (c.topic_id.clone(), c.card_index))
      .collect();
    assert_eq!(actual, expected);
  }

  #[test]
  fn test_boundary_inclusive_exclusive() {
    let catalog = seed_catalog();
    let mut scheduler = seeded(&catalog);
    let now = at();

    // Push one card out to exactly one day from now
    scheduler.record_review("wk13a_0", 5, now);
    let next = scheduler.entry("wk13a_0").unwrap().next_review;

    let at_boundary = due_cards(&catalog, &scheduler, next);
    assert!(at_boundary.iter().any(|c| c.topic_id == "wk13a" && c.card_index == 0));

    let before_boundary = due_cards(&catalog, &scheduler, next - Duration::milliseconds(1));
    assert!(!before_boundary.iter().any(|c| c.topic_id == "wk13a" && c.card_index == 0));
  }

  #[test]
  fn test_rapid_review_prefers_due_set() {
    let catalog = seed_catalog();
    let scheduler = seeded(&catalog);
    let mut rng = StdRng::seed_from_u64(7);

    let cards = rapid_review_cards(&catalog, &scheduler, at(), &mut rng);
    assert_eq!(cards.len(), catalog.total_cards());
  }

  #[test]
  fn test_rapid_review_samples_when_nothing_due() {
    let catalog = seed_catalog();
    let mut scheduler = seeded(&catalog);
    let now = at();

    // Review everything so nothing is due
    for topic in &catalog.topics {
      for index in 0..topic.flashcards.len() {
        scheduler.record_review(&card_key(&topic.id, index), 5, now);
      }
    }
    assert!(due_cards(&catalog, &scheduler, now).is_empty());

    let mut rng = StdRng::seed_from_u64(7);
    let cards = rapid_review_cards(&catalog, &scheduler, now, &mut rng);
    assert!(!cards.is_empty());
    assert!(cards.len() <= config::RAPID_REVIEW_CARD_COUNT);

    // Sampling is without replacement
    let mut keys: Vec<String> = cards
      .iter()
      .map(|c| card_key(&c.topic_id, c.card_index))
      .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), cards.len());
  }

  #[test]
  fn test_hardest_cards_ranks_low_ease_first() {
    let catalog = seed_catalog();
    let mut scheduler = seeded(&catalog);
    let now = at();

    // Fail one card repeatedly to sink its ease factor
    for _ in 0..4 {
      scheduler.record_review("wk13b_0", 0, now);
    }

    let ranked = hardest_cards(&catalog, &scheduler, 10);
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].topic_title, "Gender & Politics");
    assert_eq!(ranked[0].reviews, 4);
    assert!(ranked[0].difficulty > ranked[1].difficulty);
  }
}
