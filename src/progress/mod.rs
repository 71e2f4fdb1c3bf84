//! Progress ledger: quiz history, study streak and accumulated study
//! time.
//!
//! Independent of the scheduler; both are persisted separately through
//! the same key-value store. Mutations never save implicitly - callers
//! persist the ledger explicitly after each change.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::content::Catalog;
use crate::quiz;
use crate::srs::Scheduler;

/// Scope key for quiz history covering the whole corpus.
pub const ALL_TOPICS_SCOPE: &str = "all";

/// One completed quiz, appended to the history of its scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Percentage score, 0-100.
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
    pub questions_total: usize,
    pub questions_correct: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressLedger {
    /// Quiz history per scope key (topic id or [`ALL_TOPICS_SCOPE`]).
    quiz_scores: HashMap<String, Vec<QuizAttempt>>,
    study_streak: u32,
    last_study_date: Option<NaiveDate>,
    total_study_seconds: u64,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scored attempt to the scope's history and return it.
    pub fn record_quiz_attempt(
        &mut self,
        scope: &str,
        correct: usize,
        total: usize,
        now: DateTime<Utc>,
    ) -> QuizAttempt {
        let attempt = QuizAttempt {
            score: quiz::score(correct, total),
            recorded_at: now,
            questions_total: total,
            questions_correct: correct,
        };
        self.quiz_scores
            .entry(scope.to_string())
            .or_default()
            .push(attempt.clone());
        attempt
    }

    /// Count `today` toward the study streak if it hasn't been counted
    /// yet. Returns true when the streak advanced.
    ///
    /// TODO: the streak only ever increments; decide whether a skipped
    /// day should reset it to 1 before surfacing streaks more
    /// prominently in the UI.
    pub fn record_study_day(&mut self, today: NaiveDate) -> bool {
        if self.last_study_date == Some(today) {
            return false;
        }
        self.study_streak += 1;
        self.last_study_date = Some(today);
        true
    }

    pub fn add_study_time(&mut self, seconds: u64) {
        self.total_study_seconds += seconds;
    }

    pub fn study_streak(&self) -> u32 {
        self.study_streak
    }

    pub fn last_study_date(&self) -> Option<NaiveDate> {
        self.last_study_date
    }

    pub fn total_study_seconds(&self) -> u64 {
        self.total_study_seconds
    }

    /// History for one scope, oldest first. Unknown scopes are empty.
    pub fn history(&self, scope: &str) -> &[QuizAttempt] {
        self.quiz_scores.get(scope).map_or(&[], Vec::as_slice)
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.quiz_scores.keys().map(String::as_str)
    }

    /// Mean score across a scope's attempts, rounded.
    pub fn average_score(&self, scope: &str) -> Option<u32> {
        let attempts = self.history(scope);
        if attempts.is_empty() {
            return None;
        }
        let sum: u32 = attempts.iter().map(|a| a.score).sum();
        Some(((sum as f64) / (attempts.len() as f64)).round() as u32)
    }
}

/// Per-topic review coverage for the progress report.
#[derive(Debug, Clone, Serialize)]
pub struct TopicProgress {
    pub topic_id: String,
    pub title: String,
    pub reviewed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Quiz history rollup for one scope.
#[derive(Debug, Clone, Serialize)]
pub struct QuizHistorySummary {
    pub scope: String,
    pub title: String,
    pub attempts: usize,
    pub average_score: u32,
}

/// Everything the progress view needs in one structure.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub total_cards: usize,
    pub reviewed_cards: usize,
    pub completion_percent: u32,
    pub study_streak: u32,
    pub total_study_seconds: u64,
    pub topics: Vec<TopicProgress>,
    pub quiz_history: Vec<QuizHistorySummary>,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Assemble the aggregate progress report from catalog, scheduler and
/// ledger state. Pure; no side effects.
pub fn report(catalog: &Catalog, scheduler: &Scheduler, ledger: &ProgressLedger) -> ProgressReport {
    let topics: Vec<TopicProgress> = catalog
        .topics
        .iter()
        .map(|topic| {
            let total = topic.flashcards.len();
            let reviewed = scheduler.reviewed_in_topic(&topic.id, total);
            TopicProgress {
                topic_id: topic.id.clone(),
                title: topic.title.clone(),
                reviewed,
                total,
                percent: percent(reviewed, total),
            }
        })
        .collect();

    let mut quiz_history: Vec<QuizHistorySummary> = ledger
        .scopes()
        .map(|scope| {
            let title = if scope == ALL_TOPICS_SCOPE {
                "All Topics".to_string()
            } else {
                catalog
                    .topic(scope)
                    .map(|t| t.title.clone())
                    .unwrap_or_else(|| scope.to_string())
            };
            QuizHistorySummary {
                scope: scope.to_string(),
                title,
                attempts: ledger.history(scope).len(),
                average_score: ledger.average_score(scope).unwrap_or(0),
            }
        })
        .collect();
    quiz_history.sort_by(|a, b| a.scope.cmp(&b.scope));

    let total_cards = catalog.total_cards();
    let reviewed_cards = scheduler.reviewed_count();

    ProgressReport {
        total_cards,
        reviewed_cards,
        completion_percent: percent(reviewed_cards, total_cards),
        study_streak: ledger.study_streak(),
        total_study_seconds: ledger.total_study_seconds(),
        topics,
        quiz_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::seed_catalog;
    use crate::domain::card_key;

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_record_quiz_attempt_appends() {
        let mut ledger = ProgressLedger::new();

        let first = ledger.record_quiz_attempt("wk13a", 4, 5, at());
        assert_eq!(first.score, 80);
        assert_eq!(first.questions_correct, 4);

        ledger.record_quiz_attempt("wk13a", 5, 5, at());
        let history = ledger.history("wk13a");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].score, 80);
        assert_eq!(history[1].score, 100);
    }

    #[test]
    fn test_all_scope_separate_from_topics() {
        let mut ledger = ProgressLedger::new();
        ledger.record_quiz_attempt(ALL_TOPICS_SCOPE, 3, 5, at());
        ledger.record_quiz_attempt("wk13a", 5, 5, at());

        assert_eq!(ledger.history(ALL_TOPICS_SCOPE).len(), 1);
        assert_eq!(ledger.history("wk13a").len(), 1);
        assert!(ledger.history("wk13b").is_empty());
    }

    #[test]
    fn test_average_score() {
        let mut ledger = ProgressLedger::new();
        assert_eq!(ledger.average_score("all"), None);

        ledger.record_quiz_attempt("all", 4, 5, at()); // 80
        ledger.record_quiz_attempt("all", 2, 3, at()); // 67
        assert_eq!(ledger.average_score("all"), Some(74));
    }

    #[test]
    fn test_streak_counts_each_day_once() {
        let mut ledger = ProgressLedger::new();
        let day1 = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        assert!(ledger.record_study_day(day1));
        assert!(!ledger.record_study_day(day1));
        assert_eq!(ledger.study_streak(), 1);

        assert!(ledger.record_study_day(day2));
        assert_eq!(ledger.study_streak(), 2);
        assert_eq!(ledger.last_study_date(), Some(day2));
    }

    #[test]
    fn test_study_time_accumulates() {
        let mut ledger = ProgressLedger::new();
        ledger.add_study_time(90);
        ledger.add_study_time(30);
        assert_eq!(ledger.total_study_seconds(), 120);
    }

    #[test]
    fn test_ledger_roundtrips_through_json() {
        let mut ledger = ProgressLedger::new();
        ledger.record_quiz_attempt("wk13a", 4, 5, at());
        ledger.record_study_day(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
        ledger.add_study_time(300);

        let json = serde_json::to_string(&ledger).unwrap();
        let back: ProgressLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(back.history("wk13a"), ledger.history("wk13a"));
        assert_eq!(back.study_streak(), 1);
        assert_eq!(back.total_study_seconds(), 300);
        assert_eq!(back.last_study_date(), ledger.last_study_date());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let ledger: ProgressLedger = serde_json::from_str(r#"{"study_streak": 4}"#).unwrap();
        assert_eq!(ledger.study_streak(), 4);
        assert_eq!(ledger.total_study_seconds(), 0);
        assert!(ledger.history("all").is_empty());
    }

    #[test]
    fn test_report_aggregates() {
        let catalog = seed_catalog();
        let mut scheduler = Scheduler::new();
        scheduler.seed_from_catalog(&catalog, at());
        let mut ledger = ProgressLedger::new();

        scheduler.record_review(&card_key("wk13a", 0), 5, at());
        scheduler.record_review(&card_key("wk13a", 1), 2, at());
        ledger.record_quiz_attempt("wk13a", 4, 5, at());
        ledger.record_quiz_attempt(ALL_TOPICS_SCOPE, 3, 5, at());

        let report = report(&catalog, &scheduler, &ledger);

        assert_eq!(report.total_cards, 10);
        assert_eq!(report.reviewed_cards, 2);
        assert_eq!(report.completion_percent, 20);

        let wk13a = report.topics.iter().find(|t| t.topic_id == "wk13a").unwrap();
        assert_eq!(wk13a.reviewed, 2);
        assert_eq!(wk13a.total, 3);
        assert_eq!(wk13a.percent, 67);

        assert_eq!(report.quiz_history.len(), 2);
        let all = report.quiz_history.iter().find(|h| h.scope == "all").unwrap();
        assert_eq!(all.title, "All Topics");
        assert_eq!(all.attempts, 1);
    }
}
