use std::fmt;

use super::tab::TabId;

// === StorageError ===

/// Errors related to the key-value storage layer.
#[derive(Debug)]
pub enum StorageError {
    /// The underlying database operation failed.
    Database(String),
    /// Failed to serialize or deserialize a stored value.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Database(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Serialization(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === HostError ===

/// Errors reported by the browser host seam.
#[derive(Debug)]
pub enum HostError {
    /// The target tab is closed or has no content agent listening.
    TabUnreachable(TabId),
    /// The target window was not found.
    WindowNotFound(i64),
    /// The host API is not available in this context.
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::TabUnreachable(id) => write!(f, "Tab unreachable: {}", id),
            HostError::WindowNotFound(id) => write!(f, "Window not found: {}", id),
            HostError::Unavailable(msg) => write!(f, "Host unavailable: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

// === QuizError ===

/// Errors related to quiz session operations.
#[derive(Debug)]
pub enum QuizError {
    /// The requested category does not exist in the question bank.
    UnknownCategory(String),
    /// No quiz session is currently running.
    NoActiveQuiz,
    /// The selected option index is out of range for the current question.
    InvalidOption(usize),
    /// The current question has not been answered yet.
    QuestionUnanswered,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::UnknownCategory(name) => write!(f, "Unknown quiz category: {}", name),
            QuizError::NoActiveQuiz => write!(f, "No active quiz session"),
            QuizError::InvalidOption(index) => write!(f, "Invalid option index: {}", index),
            QuizError::QuestionUnanswered => {
                write!(f, "Current question has not been answered")
            }
        }
    }
}

impl std::error::Error for QuizError {}
