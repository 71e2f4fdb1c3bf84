use serde::{Deserialize, Serialize};

/// A single question/answer flashcard.
///
/// Cards have no identity of their own: they are addressed by their
/// position inside the owning topic's sequence (see [`card_key`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
  pub question: String,
  pub answer: String,
}

impl Flashcard {
  pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
    Self {
      question: question.into(),
      answer: answer.into(),
    }
  }
}

/// An immutable study topic with its ordered flashcards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
  pub id: String,
  pub title: String,
  pub summary: String,
  pub flashcards: Vec<Flashcard>,
}

/// One row of the recommended study schedule shipped with the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
  pub time: String,
  pub task: String,
}

/// Build the scheduler key for a card.
///
/// The key is `{topic_id}_{index}`; topic ids may themselves contain
/// underscores, so anything parsing a key back must split on the last
/// underscore.
pub fn card_key(topic_id: &str, index: usize) -> String {
  format!("{}_{}", topic_id, index)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_card_key_format() {
    assert_eq!(card_key("wk13a", 0), "wk13a_0");
    assert_eq!(card_key("wk13a", 12), "wk13a_12");
  }

  #[test]
  fn test_card_key_topic_with_underscore() {
    // Topic ids like "wk11_12" are legal; the index is always the last segment
    let key = card_key("wk11_12", 2);
    assert_eq!(key, "wk11_12_2");
    let (topic, index) = key.rsplit_once('_').unwrap();
    assert_eq!(topic, "wk11_12");
    assert_eq!(index, "2");
  }

  #[test]
  fn test_flashcard_new() {
    let card = Flashcard::new("What is gender?", "A social and cultural construct.");
    assert_eq!(card.question, "What is gender?");
    assert_eq!(card.answer, "A social and cultural construct.");
  }
}
