//! Multiple-choice quiz generation over the catalog.
//!
//! Questions are ephemeral: built at quiz start, graded client-side,
//! and never persisted. Only the completion result reaches the
//! progress ledger.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config;
use crate::content::Catalog;

/// One generated multiple-choice question.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
  pub question: String,
  /// Exactly four options: the answer plus three distractors, shuffled.
  pub options: Vec<String>,
  pub correct_index: usize,
  /// Shown after answering; always the correct answer text.
  pub explanation: String,
  pub topic_title: String,
}

/// Generate up to `count` questions from `topic_id`, or from the whole
/// corpus when no topic is given.
///
/// Selection is uniform without replacement (shuffle the pool, take a
/// prefix), so asking for more questions than the pool holds yields one
/// question per card. Distractors for every question draw from the full
/// pool, not just the selected cards.
pub fn generate(
  catalog: &Catalog,
  topic_id: Option<&str>,
  count: usize,
  rng: &mut impl Rng,
) -> Vec<QuizQuestion> {
  let pool: Vec<(&str, &str, &str)> = match topic_id {
    Some(id) => match catalog.topic(id) {
      Some(topic) => topic
        .flashcards
        .iter()
        .map(|c| (c.question.as_str(), c.answer.as_str(), topic.title.as_str()))
        .collect(),
      None => return Vec::new(),
    },
    None => catalog
      .topics
      .iter()
      .flat_map(|topic| {
        topic
          .flashcards
          .iter()
          .map(|c| (c.question.as_str(), c.answer.as_str(), topic.title.as_str()))
      })
      .collect(),
  };

  let all_answers: Vec<&str> = pool.iter().map(|(_, a, _)| *a).collect();

  let mut selected = pool.clone();
  selected.shuffle(rng);
  selected.truncate(count.min(pool.len()));

  selected
    .into_iter()
    .map(|(question, answer, topic_title)| {
      let distractors = build_distractors(answer, &all_answers, rng);

      let mut options: Vec<String> = Vec::with_capacity(config::QUIZ_OPTION_COUNT);
      options.push(answer.to_string());
      options.extend(distractors);
      options.shuffle(rng);

      let correct_index = options
        .iter()
        .position(|o| o.as_str() == answer)
        .unwrap_or_default();

      QuizQuestion {
        question: question.to_string(),
        options,
        correct_index,
        explanation: answer.to_string(),
        topic_title: topic_title.to_string(),
      }
    })
    .collect()
}

/// Pick three distractors for `correct` from the other answers in the
/// pool. Duplicate answer texts collapse to one candidate, and when the
/// pool can't supply three the remainder is synthesized so a question
/// always has four options.
fn build_distractors(correct: &str, all_answers: &[&str], rng: &mut impl Rng) -> Vec<String> {
  let mut candidates: Vec<&str> = all_answers
    .iter()
    .copied()
    .filter(|a| *a != correct)
    .collect();
  candidates.sort_unstable();
  candidates.dedup();
  candidates.shuffle(rng);

  let mut distractors: Vec<String> = candidates
    .into_iter()
    .take(config::DISTRACTOR_COUNT)
    .map(str::to_string)
    .collect();

  while distractors.len() < config::DISTRACTOR_COUNT {
    distractors.push(format!("Alternative answer {}", distractors.len() + 1));
  }

  distractors
}

/// Percentage score for a finished quiz, rounded to the nearest point.
pub fn score(correct: usize, total: usize) -> u32 {
  if total == 0 {
    return 0;
  }
  ((correct as f64 / total as f64) * 100.0).round() as u32
}
