//! Core data model types for quizmaster.
//!
//! These are the fundamental types the entire quizmaster system uses to
//! represent questions, quiz results, and saved state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A normalized quiz question, immutable once produced by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the player.
    pub text: String,
    /// Answer options in display order. Always at least 2 entries.
    pub options: Vec<String>,
    /// 0-based index of the correct option.
    ///
    /// May exceed `options.len()` when the source file declared an answer
    /// letter beyond its option list; the loader preserves such records
    /// verbatim instead of rejecting them.
    pub correct_index: usize,
    /// Explanation shown after answering. Defaulted when the source omits it.
    pub explanation: String,
}

/// A raw question record as it appears in a question-bank JSON file.
///
/// Source files mix two shapes: a "lettered" shape with `A`–`D` fields and
/// an "options" shape with an options array. All fields are optional here;
/// [`RecordShape::of`] classifies a record once, and the loader drops
/// anything unrecognizable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestionRecord {
    #[serde(default)]
    pub question: String,
    #[serde(rename = "A", default)]
    pub option_a: Option<String>,
    #[serde(rename = "B", default)]
    pub option_b: Option<String>,
    #[serde(rename = "C", default)]
    pub option_c: Option<String>,
    #[serde(rename = "D", default)]
    pub option_d: Option<String>,
    /// Correct answer as a letter ("A", "B", ...).
    #[serde(default)]
    pub answer: Option<String>,
    /// Options array, entries optionally letter-prefixed like "A. text".
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Correct answer as a 0-based numeric index.
    #[serde(rename = "correctAnswer", default)]
    pub correct_answer: Option<i64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Which of the two supported record shapes a raw record matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// Has an options array of length >= 2 plus a resolvable answer.
    Options,
    /// Has all four of `A`–`D` plus an answer letter.
    Lettered,
    /// Neither shape; the record is dropped.
    Unrecognized,
}

impl RecordShape {
    /// Classify a raw record. Computed once per record so normalization can
    /// branch exhaustively instead of re-probing fields.
    pub fn of(record: &RawQuestionRecord) -> Self {
        let has_options_array = record
            .options
            .as_ref()
            .is_some_and(|opts| opts.len() >= 2);
        if has_options_array && (record.answer.is_some() || record.correct_answer.is_some()) {
            return RecordShape::Options;
        }

        let has_lettered_fields = record.option_a.is_some()
            && record.option_b.is_some()
            && record.option_c.is_some()
            && record.option_d.is_some();
        if has_lettered_fields && record.answer.is_some() {
            return RecordShape::Lettered;
        }

        RecordShape::Unrecognized
    }
}

/// The outcome of one finished quiz, appended to the statistics document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    /// Unique identifier for this completion.
    pub id: Uuid,
    /// When the quiz was finished.
    pub date: DateTime<Utc>,
    /// Category the quiz was played in.
    pub category: String,
    /// Percentage score, rounded to the nearest integer (ties round up).
    pub score: u32,
    /// Number of questions in the session.
    pub total_questions: usize,
    /// Number answered correctly.
    pub correct_answers: u32,
}

/// Cumulative statistics across all finished quizzes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    #[serde(default)]
    pub quizzes: Vec<CompletionRecord>,
    #[serde(default)]
    pub total_quizzes: u32,
}

/// Per-category auxiliary counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// How many times a quiz in this category was completed.
    #[serde(default)]
    pub completed: u32,
    /// Best percentage score seen for this category.
    #[serde(default)]
    pub high_score: u32,
}

/// Resumable snapshot of an in-progress quiz.
///
/// Deliberately minimal: per-question answer detail is not persisted, so a
/// resumed session only knows its position and score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub current_index: usize,
    pub score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lettered_record() -> RawQuestionRecord {
        RawQuestionRecord {
            question: "Which organelle produces ATP?".into(),
            option_a: Some("Nucleus".into()),
            option_b: Some("Mitochondria".into()),
            option_c: Some("Golgi apparatus".into()),
            option_d: Some("Ribosome".into()),
            answer: Some("B".into()),
            ..Default::default()
        }
    }

    #[test]
    fn shape_lettered() {
        assert_eq!(RecordShape::of(&lettered_record()), RecordShape::Lettered);
    }

    #[test]
    fn shape_options_with_letter_answer() {
        let record = RawQuestionRecord {
            question: "Q".into(),
            options: Some(vec!["x".into(), "y".into()]),
            answer: Some("A".into()),
            ..Default::default()
        };
        assert_eq!(RecordShape::of(&record), RecordShape::Options);
    }

    #[test]
    fn shape_options_with_numeric_answer() {
        let record = RawQuestionRecord {
            question: "Q".into(),
            options: Some(vec!["x".into(), "y".into()]),
            correct_answer: Some(1),
            ..Default::default()
        };
        assert_eq!(RecordShape::of(&record), RecordShape::Options);
    }

    #[test]
    fn shape_options_wins_over_lettered() {
        // A record carrying both shapes is treated as the options form.
        let mut record = lettered_record();
        record.options = Some(vec!["x".into(), "y".into()]);
        assert_eq!(RecordShape::of(&record), RecordShape::Options);
    }

    #[test]
    fn shape_unrecognized_short_options() {
        let record = RawQuestionRecord {
            question: "Q".into(),
            options: Some(vec!["only one".into()]),
            answer: Some("A".into()),
            ..Default::default()
        };
        assert_eq!(RecordShape::of(&record), RecordShape::Unrecognized);
    }

    #[test]
    fn shape_unrecognized_missing_letter() {
        let mut record = lettered_record();
        record.option_c = None;
        assert_eq!(RecordShape::of(&record), RecordShape::Unrecognized);
    }

    #[test]
    fn shape_unrecognized_no_answer() {
        let record = RawQuestionRecord {
            question: "Q".into(),
            options: Some(vec!["x".into(), "y".into()]),
            ..Default::default()
        };
        assert_eq!(RecordShape::of(&record), RecordShape::Unrecognized);
    }

    #[test]
    fn raw_record_deserializes_both_shapes() {
        let lettered: RawQuestionRecord = serde_json::from_str(
            r#"{"question":"Q","A":"a","B":"b","C":"c","D":"d","answer":"A"}"#,
        )
        .unwrap();
        assert_eq!(RecordShape::of(&lettered), RecordShape::Lettered);

        let options: RawQuestionRecord = serde_json::from_str(
            r#"{"question":"Q","options":["A. x","B. y"],"correctAnswer":1}"#,
        )
        .unwrap();
        assert_eq!(RecordShape::of(&options), RecordShape::Options);
        assert_eq!(options.correct_answer, Some(1));
    }

    #[test]
    fn stats_document_serde_roundtrip() {
        let stats = QuizStats {
            quizzes: vec![CompletionRecord {
                id: Uuid::new_v4(),
                date: Utc::now(),
                category: "biology".into(),
                score: 50,
                total_questions: 2,
                correct_answers: 1,
            }],
            total_quizzes: 1,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("totalQuizzes"));
        assert!(json.contains("correctAnswers"));
        let back: QuizStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_quizzes, 1);
        assert_eq!(back.quizzes[0].score, 50);
    }

    #[test]
    fn stats_document_tolerates_empty_object() {
        let stats: QuizStats = serde_json::from_str("{}").unwrap();
        assert!(stats.quizzes.is_empty());
        assert_eq!(stats.total_quizzes, 0);
    }
}
