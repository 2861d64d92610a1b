use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct: usize,
}

/// A finished quiz session, before the coordinator stamps it.
///
/// `category` and `total` default when absent so records written by older
/// callers still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizResultDraft {
    #[serde(default)]
    pub category: String,
    pub score: u32,
    #[serde(default)]
    pub total: u32,
    /// Longest run of consecutive correct answers in the session.
    /// Optional on the wire; absent is aggregated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
}

/// A stored quiz result record, as persisted under `quizResults`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizResult {
    #[serde(default)]
    pub category: String,
    pub score: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak: Option<u32>,
    /// Epoch milliseconds at append time.
    pub timestamp: u64,
}

impl QuizResultDraft {
    pub fn into_result(self, timestamp: u64) -> QuizResult {
        QuizResult {
            category: self.category,
            score: self.score,
            total: self.total,
            streak: self.streak,
            timestamp,
        }
    }
}

/// Aggregated user statistics returned by `getStats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub quizzes_taken: u64,
    pub total_score: u64,
    pub best_streak: u64,
    pub average_score: f64,
    pub recent_performance: Vec<QuizResult>,
}

/// Five-tier rating shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    Excellent,
    Great,
    Good,
    KeepPracticing,
    DontGiveUp,
}

impl PerformanceTier {
    /// Rates a percentage score (0–100).
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            PerformanceTier::Excellent
        } else if percentage >= 75.0 {
            PerformanceTier::Great
        } else if percentage >= 60.0 {
            PerformanceTier::Good
        } else if percentage >= 40.0 {
            PerformanceTier::KeepPracticing
        } else {
            PerformanceTier::DontGiveUp
        }
    }

    /// Display string for the results screen.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent!",
            PerformanceTier::Great => "Great job!",
            PerformanceTier::Good => "Good work!",
            PerformanceTier::KeepPracticing => "Keep practicing!",
            PerformanceTier::DontGiveUp => "Don't give up!",
        }
    }
}
