use std::sync::Arc;

use crate::host::Clock;
use crate::storage::KvStore;
use crate::types::errors::StorageError;
use crate::types::preferences::Preferences;
use crate::types::quiz::{QuizResult, QuizResultDraft, QuizStats};

/// Storage keys owned by the quiz coordinator.
pub const QUIZZES_TAKEN_KEY: &str = "quizzesTaken";
pub const TOTAL_SCORE_KEY: &str = "totalScore";
pub const BEST_STREAK_KEY: &str = "bestStreak";
pub const QUIZ_RESULTS_KEY: &str = "quizResults";
pub const PREFERENCES_KEY: &str = "preferences";

/// Only the most recent results are retained.
pub const RESULT_LOG_CAP: usize = 50;

/// Window of results reported as recent performance.
pub const RECENT_WINDOW: usize = 10;

/// Trait defining the quiz result log interface.
pub trait QuizLogTrait {
    fn initialize_defaults(&self) -> Result<(), StorageError>;
    fn append(&self, draft: QuizResultDraft) -> Result<(), StorageError>;
    fn results(&self) -> Result<Vec<QuizResult>, StorageError>;
    fn stats(&self) -> Result<QuizStats, StorageError>;
    fn record_quiz_taken(&self) -> u64;
    fn quizzes_taken(&self) -> u64;
    fn badge_text(&self) -> Option<String>;
}

/// Persistence and aggregation for quiz results.
///
/// The log is append-only with FIFO eviction past [`RESULT_LOG_CAP`];
/// `totalScore` and `bestStreak` fold in on every append. `quizzesTaken`
/// is the popup's own counter and moves independently of appends.
pub struct QuizLog {
    store: Arc<KvStore>,
    clock: Arc<dyn Clock>,
}

impl QuizLog {
    pub fn new(store: Arc<KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl QuizLogTrait for QuizLog {
    /// Seeds the counters and preferences written on first install,
    /// leaving any existing values untouched.
    fn initialize_defaults(&self) -> Result<(), StorageError> {
        self.store.set_if_absent(QUIZZES_TAKEN_KEY, &0u64)?;
        self.store.set_if_absent(TOTAL_SCORE_KEY, &0u64)?;
        self.store.set_if_absent(BEST_STREAK_KEY, &0u64)?;
        self.store
            .set_if_absent(PREFERENCES_KEY, &Preferences::default())?;
        Ok(())
    }

    /// Stamps and appends a result, evicts the oldest entries past the cap,
    /// and folds the aggregates.
    fn append(&self, draft: QuizResultDraft) -> Result<(), StorageError> {
        let mut results: Vec<QuizResult> = self.store.get(QUIZ_RESULTS_KEY)?.unwrap_or_default();
        let total_score: u64 = self.store.get(TOTAL_SCORE_KEY)?.unwrap_or(0);
        let best_streak: u64 = self.store.get(BEST_STREAK_KEY)?.unwrap_or(0);

        let new_total = total_score + u64::from(draft.score);
        let new_best = best_streak.max(u64::from(draft.streak.unwrap_or(0)));

        results.push(draft.into_result(self.clock.now_ms()));
        if results.len() > RESULT_LOG_CAP {
            let excess = results.len() - RESULT_LOG_CAP;
            results.drain(..excess);
        }

        self.store.set(QUIZ_RESULTS_KEY, &results)?;
        self.store.set(TOTAL_SCORE_KEY, &new_total)?;
        self.store.set(BEST_STREAK_KEY, &new_best)?;
        Ok(())
    }

    /// The retained result log, oldest first.
    fn results(&self) -> Result<Vec<QuizResult>, StorageError> {
        Ok(self.store.get(QUIZ_RESULTS_KEY)?.unwrap_or_default())
    }

    /// Aggregated statistics for the stats screen.
    fn stats(&self) -> Result<QuizStats, StorageError> {
        let results = self.results()?;
        let average_score = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| f64::from(r.score)).sum::<f64>() / results.len() as f64
        };
        let recent_start = results.len().saturating_sub(RECENT_WINDOW);
        Ok(QuizStats {
            quizzes_taken: self.store.get(QUIZZES_TAKEN_KEY)?.unwrap_or(0),
            total_score: self.store.get(TOTAL_SCORE_KEY)?.unwrap_or(0),
            best_streak: self.store.get(BEST_STREAK_KEY)?.unwrap_or(0),
            average_score,
            recent_performance: results[recent_start..].to_vec(),
        })
    }

    /// Bumps the taken counter and returns the new value.
    ///
    /// A storage failure is logged and leaves the counter display where it
    /// was; the popup never sees an error.
    fn record_quiz_taken(&self) -> u64 {
        let current = self.store.counter(QUIZZES_TAKEN_KEY);
        let next = current + 1;
        if let Err(e) = self.store.set(QUIZZES_TAKEN_KEY, &next) {
            tracing::warn!(error = %e, "failed to record quiz taken");
            return current;
        }
        next
    }

    /// Taken counter, degrading to zero when storage is unavailable.
    fn quizzes_taken(&self) -> u64 {
        self.store.counter(QUIZZES_TAKEN_KEY)
    }

    /// Toolbar badge text; empty badge until the first quiz.
    fn badge_text(&self) -> Option<String> {
        let count = self.quizzes_taken();
        if count > 0 {
            Some(count.to_string())
        } else {
            None
        }
    }
}
