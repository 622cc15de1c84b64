//! Typed wrappers over the key-value store.
//!
//! The browser original kept everything in local storage under a handful of
//! well-known keys; these wrappers keep the same keys and the same
//! malformed-value-is-absent semantics, but give the rest of the system a
//! typed surface.

use std::sync::Arc;

use crate::model::{CategoryStats, CompletionRecord, QuizStats, SavedProgress};
use crate::traits::KeyValueStore;

/// Key holding the current question index of an in-progress quiz.
pub const PROGRESS_KEY: &str = "quizProgress";
/// Key holding the running score of an in-progress quiz.
pub const CURRENT_SCORE_KEY: &str = "currentScore";
/// Key holding the cumulative statistics document.
pub const STATS_KEY: &str = "quizStats";

/// How many history rows the stats summary shows.
const HISTORY_LEN: usize = 5;

/// Saves and restores in-progress quiz snapshots.
///
/// Index and score live under separate keys as plain integers, the way the
/// original client stored them.
#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, progress: &SavedProgress) {
        self.store.set(PROGRESS_KEY, &progress.current_index.to_string());
        self.store.set(CURRENT_SCORE_KEY, &progress.score.to_string());
    }

    /// Load saved progress. Missing or non-numeric values are treated as
    /// absent so a corrupted save can only ever cause a fresh start.
    pub fn load(&self) -> Option<SavedProgress> {
        let current_index = self.store.get(PROGRESS_KEY)?.parse().ok()?;
        let score = self.store.get(CURRENT_SCORE_KEY)?.parse().ok()?;
        Some(SavedProgress {
            current_index,
            score,
        })
    }

    pub fn clear(&self) {
        self.store.remove(PROGRESS_KEY);
        self.store.remove(CURRENT_SCORE_KEY);
    }
}

/// Summary derived from the statistics document.
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub total_quizzes: u32,
    /// Mean percentage score, rounded to the nearest integer.
    pub average_score: u32,
    /// Best percentage score.
    pub best_score: u32,
    /// Most recent completions, newest first.
    pub recent: Vec<CompletionRecord>,
}

/// Reads and updates the cumulative statistics document plus the
/// per-category auxiliary counters.
#[derive(Clone)]
pub struct StatsStore {
    store: Arc<dyn KeyValueStore>,
}

impl StatsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the statistics document, defaulting to empty on absence or a
    /// value that no longer parses.
    pub fn load(&self) -> QuizStats {
        match self.store.get(STATS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding malformed statistics document: {e}");
                QuizStats::default()
            }),
            None => QuizStats::default(),
        }
    }

    /// Append a completion to the document and bump the category counters.
    pub fn record_completion(&self, record: &CompletionRecord) {
        let mut stats = self.load();
        stats.total_quizzes += 1;
        stats.quizzes.push(record.clone());
        self.save(&stats);

        let key = category_stats_key(&record.category);
        let mut category = self.category_stats(&record.category);
        category.completed += 1;
        category.high_score = category.high_score.max(record.score);
        match serde_json::to_string(&category) {
            Ok(json) => self.store.set(&key, &json),
            Err(e) => tracing::warn!("cannot serialize category stats: {e}"),
        }
    }

    /// Per-category counters, zeroed when absent or malformed.
    pub fn category_stats(&self, category: &str) -> CategoryStats {
        self.store
            .get(&category_stats_key(category))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Reset the statistics document to empty. Category counters are kept,
    /// matching the original reset behavior.
    pub fn reset(&self) {
        self.save(&QuizStats::default());
    }

    /// Derive the summary shown on the stats view.
    pub fn summary(&self) -> StatsSummary {
        let stats = self.load();
        if stats.quizzes.is_empty() {
            return StatsSummary {
                total_quizzes: stats.total_quizzes,
                ..Default::default()
            };
        }

        let sum: u64 = stats.quizzes.iter().map(|q| u64::from(q.score)).sum();
        let average_score = (sum as f64 / stats.quizzes.len() as f64).round() as u32;
        let best_score = stats.quizzes.iter().map(|q| q.score).max().unwrap_or(0);
        let recent = stats
            .quizzes
            .iter()
            .rev()
            .take(HISTORY_LEN)
            .cloned()
            .collect();

        StatsSummary {
            total_quizzes: stats.total_quizzes,
            average_score,
            best_score,
            recent,
        }
    }

    fn save(&self, stats: &QuizStats) {
        match serde_json::to_string(stats) {
            Ok(json) => self.store.set(STATS_KEY, &json),
            Err(e) => tracing::warn!("cannot serialize statistics document: {e}"),
        }
    }
}

fn category_stats_key(category: &str) -> String {
    format!("{category}Stats")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Minimal in-memory store for unit tests; the real implementations
    /// live in `quizmaster-storage`.
    #[derive(Default)]
    struct TestStore(Mutex<HashMap<String, String>>);

    impl KeyValueStore for TestStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.lock().unwrap().insert(key.into(), value.into());
        }
        fn remove(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }
    }

    fn completion(category: &str, score: u32) -> CompletionRecord {
        CompletionRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            category: category.into(),
            score,
            total_questions: 4,
            correct_answers: score / 25,
        }
    }

    #[test]
    fn progress_round_trip() {
        let progress = ProgressStore::new(Arc::new(TestStore::default()));
        assert!(progress.load().is_none());

        progress.save(&SavedProgress {
            current_index: 3,
            score: 2,
        });
        assert_eq!(
            progress.load(),
            Some(SavedProgress {
                current_index: 3,
                score: 2
            })
        );

        progress.clear();
        assert!(progress.load().is_none());
    }

    #[test]
    fn malformed_progress_is_absent() {
        let store = Arc::new(TestStore::default());
        store.set(PROGRESS_KEY, "three");
        store.set(CURRENT_SCORE_KEY, "2");
        assert!(ProgressStore::new(store.clone()).load().is_none());

        store.set(PROGRESS_KEY, "3");
        store.set(CURRENT_SCORE_KEY, "-1");
        assert!(ProgressStore::new(store).load().is_none());
    }

    #[test]
    fn record_completion_accumulates() {
        let stats = StatsStore::new(Arc::new(TestStore::default()));
        stats.record_completion(&completion("biology", 50));
        stats.record_completion(&completion("biology", 100));
        stats.record_completion(&completion("history", 75));

        let doc = stats.load();
        assert_eq!(doc.total_quizzes, 3);
        assert_eq!(doc.quizzes.len(), 3);

        let biology = stats.category_stats("biology");
        assert_eq!(biology.completed, 2);
        assert_eq!(biology.high_score, 100);
        assert_eq!(stats.category_stats("sports").completed, 0);
    }

    #[test]
    fn summary_averages_and_orders_history() {
        let stats = StatsStore::new(Arc::new(TestStore::default()));
        for score in [40, 60, 90, 20, 70, 100] {
            stats.record_completion(&completion("general", score));
        }

        let summary = stats.summary();
        assert_eq!(summary.total_quizzes, 6);
        assert_eq!(summary.average_score, 63); // 380/6 = 63.33
        assert_eq!(summary.best_score, 100);
        assert_eq!(summary.recent.len(), 5);
        assert_eq!(summary.recent[0].score, 100); // newest first
        assert_eq!(summary.recent[4].score, 60);
    }

    #[test]
    fn reset_clears_document_but_not_counters() {
        let stats = StatsStore::new(Arc::new(TestStore::default()));
        stats.record_completion(&completion("biology", 50));
        stats.reset();

        assert_eq!(stats.load().total_quizzes, 0);
        assert!(stats.load().quizzes.is_empty());
        assert_eq!(stats.category_stats("biology").completed, 1);
    }

    #[test]
    fn malformed_stats_document_defaults() {
        let store = Arc::new(TestStore::default());
        store.set(STATS_KEY, "{broken");
        let stats = StatsStore::new(store);
        assert_eq!(stats.load().total_quizzes, 0);
        assert_eq!(stats.summary().total_quizzes, 0);
    }
}
