//! The quiz-session state machine.
//!
//! A [`QuizSession`] walks an ordered question list: answer, advance,
//! retreat, restart, plus a post-completion review overlay restricted to
//! incorrectly answered questions. Every operation is a pure in-memory
//! mutation guarded by state checks; invalid calls are no-ops rather than
//! errors. Persistence happens at the boundary through the typed stores in
//! [`crate::store`].

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::model::{CompletionRecord, Question, SavedProgress};

/// How one question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub chosen_index: usize,
    pub is_correct: bool,
}

/// Where the session currently navigates.
///
/// Review state lives inside the variant instead of in separate nullable
/// fields, so linear and review transitions cannot interleave by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationMode {
    Linear,
    Review { queue: Vec<usize>, cursor: usize },
}

/// Result of an [`QuizSession::answer`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The choice was recorded.
    Recorded { is_correct: bool },
    /// Invalid transition (already answered, or not on an open question).
    Ignored,
}

/// Result of an [`QuizSession::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved to the next question.
    Moved,
    /// The last question was passed; the session is now at the results
    /// position. The caller should persist the record and clear any saved
    /// progress.
    Completed(CompletionRecord),
    /// The review queue is exhausted; the session is back at the results
    /// position. Nothing is re-scored.
    ReviewFinished,
    /// Invalid transition (current question unanswered, or already at the
    /// results position).
    Ignored,
}

/// Result of an [`QuizSession::enter_review`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStart {
    /// Review mode entered, positioned at the first incorrect question.
    Started,
    /// Every answer was correct; state is unchanged.
    NothingToReview,
    /// Not at the results position; state is unchanged.
    Ignored,
}

/// One active quiz attempt.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    category: String,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    answered: BTreeMap<usize, AnswerRecord>,
    mode: NavigationMode,
}

impl QuizSession {
    /// Start a fresh session at question 0.
    pub fn new(category: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            questions,
            current_index: 0,
            score: 0,
            answered: BTreeMap::new(),
            mode: NavigationMode::Linear,
        }
    }

    /// Start a session from saved progress.
    ///
    /// Saved progress carries only `{current_index, score}`; per-question
    /// answer detail is not persisted, so `answered` starts empty and review
    /// can only cover questions answered after the resume point. Out-of-range
    /// values are treated as absent and the session starts fresh.
    pub fn resume(
        category: impl Into<String>,
        questions: Vec<Question>,
        progress: SavedProgress,
    ) -> Self {
        let mut session = Self::new(category, questions);
        let valid = progress.current_index < session.questions.len()
            && progress.score as usize <= progress.current_index;
        if valid {
            session.current_index = progress.current_index;
            session.score = progress.score;
        } else {
            tracing::warn!(
                "ignoring out-of-range saved progress (index {}, score {})",
                progress.current_index,
                progress.score
            );
        }
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The question at the current position, `None` at the results position.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// How the question at `index` was answered, if it was.
    pub fn answer_for(&self, index: usize) -> Option<&AnswerRecord> {
        self.answered.get(&index)
    }

    /// Number of questions answered so far.
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    /// True once the session sits at the results position.
    pub fn is_terminal(&self) -> bool {
        matches!(self.mode, NavigationMode::Linear) && self.current_index == self.questions.len()
    }

    pub fn in_review(&self) -> bool {
        matches!(self.mode, NavigationMode::Review { .. })
    }

    /// `(position, queue length)` while in review mode.
    pub fn review_position(&self) -> Option<(usize, usize)> {
        match &self.mode {
            NavigationMode::Review { queue, cursor } => Some((*cursor, queue.len())),
            NavigationMode::Linear => None,
        }
    }

    /// Snapshot for the progress store. Meaningful only while the session is
    /// still on the linear path before the results position.
    pub fn progress(&self) -> SavedProgress {
        SavedProgress {
            current_index: self.current_index,
            score: self.score,
        }
    }

    /// Percentage score over the full question count, ties rounding up.
    pub fn percent_score(&self) -> u32 {
        percent(self.score, self.questions.len())
    }

    /// Record an answer for the current question.
    ///
    /// Valid only on an open question during linear play, and only once per
    /// question index; repeat calls are ignored so the score cannot be
    /// corrupted. Does not advance the position.
    pub fn answer(&mut self, choice_index: usize) -> AnswerOutcome {
        if self.in_review() || self.current_index >= self.questions.len() {
            return AnswerOutcome::Ignored;
        }
        if self.answered.contains_key(&self.current_index) {
            return AnswerOutcome::Ignored;
        }

        let is_correct = choice_index == self.questions[self.current_index].correct_index;
        self.answered.insert(
            self.current_index,
            AnswerRecord {
                chosen_index: choice_index,
                is_correct,
            },
        );
        if is_correct {
            self.score += 1;
        }
        AnswerOutcome::Recorded { is_correct }
    }

    /// Move forward one step.
    ///
    /// Linear play requires the current question to be answered first and
    /// yields [`AdvanceOutcome::Completed`] when the results position is
    /// reached. Review play walks the incorrect-question queue and yields
    /// [`AdvanceOutcome::ReviewFinished`] when it is exhausted.
    pub fn advance(&mut self) -> AdvanceOutcome {
        match &mut self.mode {
            NavigationMode::Review { queue, cursor } => {
                *cursor += 1;
                if let Some(&index) = queue.get(*cursor) {
                    self.current_index = index;
                    AdvanceOutcome::Moved
                } else {
                    self.mode = NavigationMode::Linear;
                    self.current_index = self.questions.len();
                    AdvanceOutcome::ReviewFinished
                }
            }
            NavigationMode::Linear => {
                if self.current_index >= self.questions.len()
                    || !self.answered.contains_key(&self.current_index)
                {
                    return AdvanceOutcome::Ignored;
                }
                self.current_index += 1;
                if self.current_index == self.questions.len() {
                    AdvanceOutcome::Completed(self.completion_record())
                } else {
                    AdvanceOutcome::Moved
                }
            }
        }
    }

    /// Move back one step. Never mutates score or answers; a no-op at the
    /// start of either navigation mode and at the results position.
    pub fn retreat(&mut self) -> bool {
        match &mut self.mode {
            NavigationMode::Review { queue, cursor } => {
                if *cursor == 0 {
                    return false;
                }
                *cursor -= 1;
                self.current_index = queue[*cursor];
                true
            }
            NavigationMode::Linear => {
                if self.current_index == 0 || self.current_index >= self.questions.len() {
                    return false;
                }
                self.current_index -= 1;
                true
            }
        }
    }

    /// Reset to a fresh attempt at question 0. The caller clears any saved
    /// progress alongside.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.answered.clear();
        self.mode = NavigationMode::Linear;
    }

    /// Enter the review overlay over incorrectly answered questions.
    ///
    /// Valid only from the results position. The queue preserves original
    /// question order.
    pub fn enter_review(&mut self) -> ReviewStart {
        if !self.is_terminal() {
            return ReviewStart::Ignored;
        }

        let queue: Vec<usize> = self
            .answered
            .iter()
            .filter(|(_, record)| !record.is_correct)
            .map(|(&index, _)| index)
            .collect();

        if queue.is_empty() {
            return ReviewStart::NothingToReview;
        }

        self.current_index = queue[0];
        self.mode = NavigationMode::Review { queue, cursor: 0 };
        ReviewStart::Started
    }

    fn completion_record(&self) -> CompletionRecord {
        CompletionRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            category: self.category.clone(),
            score: self.percent_score(),
            total_questions: self.questions.len(),
            correct_answers: self.score,
        }
    }
}

/// `round(100 * score / total)` with ties rounding up, 0 for an empty quiz.
fn percent(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * score as f64 / total as f64).round() as u32
}
