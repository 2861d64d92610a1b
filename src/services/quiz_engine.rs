use rand::seq::SliceRandom;

use crate::types::errors::QuizError;
use crate::types::quiz::{PerformanceTier, Question, QuizResultDraft};

use super::question_bank::QuestionBank;

/// Feedback for a just-selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    /// Wrong selection; carries the correct option index so the popup can
    /// highlight it.
    Incorrect { correct: usize },
}

/// Result of advancing past the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// More questions remain.
    Next,
    /// The session is over; the draft goes to the quiz result log.
    Finished {
        draft: QuizResultDraft,
        tier: PerformanceTier,
    },
}

/// Trait defining the popup quiz session interface.
pub trait QuizEngineTrait {
    fn start(&mut self, category: &str) -> Result<(), QuizError>;
    fn current_question(&self) -> Option<&Question>;
    fn select_answer(&mut self, index: usize) -> Result<Option<AnswerFeedback>, QuizError>;
    fn advance(&mut self) -> Result<Advance, QuizError>;
    fn score(&self) -> u32;
    fn progress(&self) -> Option<(usize, usize)>;
    fn is_last_question(&self) -> bool;
}

struct Session {
    category: String,
    questions: Vec<Question>,
    index: usize,
    score: u32,
    /// Selected option for the current question; answering is one-shot.
    selected: Option<usize>,
    current_streak: u32,
    best_streak: u32,
}

/// Ephemeral popup quiz state machine.
///
/// Holds at most one session; starting a new quiz discards the old one.
pub struct QuizEngine {
    bank: QuestionBank,
    session: Option<Session>,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            session: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

impl QuizEngineTrait for QuizEngine {
    /// Starts a session over a shuffled copy of the category's questions.
    fn start(&mut self, category: &str) -> Result<(), QuizError> {
        let questions = self
            .bank
            .questions(category)
            .ok_or_else(|| QuizError::UnknownCategory(category.to_string()))?;
        let mut questions = questions.to_vec();
        questions.shuffle(&mut rand::thread_rng());

        self.session = Some(Session {
            category: category.to_string(),
            questions,
            index: 0,
            score: 0,
            selected: None,
            current_streak: 0,
            best_streak: 0,
        });
        Ok(())
    }

    fn current_question(&self) -> Option<&Question> {
        let session = self.session.as_ref()?;
        session.questions.get(session.index)
    }

    /// Records an answer for the current question.
    ///
    /// Accepted once per question: repeated calls return `Ok(None)` and
    /// change nothing. A correct answer bumps the score and the running
    /// streak; a wrong one breaks the streak.
    fn select_answer(&mut self, index: usize) -> Result<Option<AnswerFeedback>, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoActiveQuiz)?;
        let question = session
            .questions
            .get(session.index)
            .ok_or(QuizError::NoActiveQuiz)?;

        if session.selected.is_some() {
            return Ok(None);
        }
        if index >= question.options.len() {
            return Err(QuizError::InvalidOption(index));
        }

        session.selected = Some(index);
        let feedback = if index == question.correct {
            session.score += 1;
            session.current_streak += 1;
            session.best_streak = session.best_streak.max(session.current_streak);
            AnswerFeedback::Correct
        } else {
            session.current_streak = 0;
            AnswerFeedback::Incorrect {
                correct: question.correct,
            }
        };
        Ok(Some(feedback))
    }

    /// Moves to the next question, or finalizes at the end of the sequence.
    ///
    /// Advancement is locked until the current question has been answered.
    fn advance(&mut self) -> Result<Advance, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoActiveQuiz)?;
        if session.selected.is_none() {
            return Err(QuizError::QuestionUnanswered);
        }

        session.index += 1;
        session.selected = None;

        if session.index < session.questions.len() {
            return Ok(Advance::Next);
        }

        let session = self.session.take().expect("session checked above");
        let total = session.questions.len() as u32;
        let percentage = if total == 0 {
            0.0
        } else {
            f64::from(session.score) / f64::from(total) * 100.0
        };
        Ok(Advance::Finished {
            draft: QuizResultDraft {
                category: session.category,
                score: session.score,
                total,
                streak: Some(session.best_streak),
            },
            tier: PerformanceTier::from_percentage(percentage),
        })
    }

    fn score(&self) -> u32 {
        self.session.as_ref().map(|s| s.score).unwrap_or(0)
    }

    /// Zero-based question index and total, while a session runs.
    fn progress(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|s| (s.index, s.questions.len()))
    }

    fn is_last_question(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.index + 1 == s.questions.len())
            .unwrap_or(false)
    }
}
