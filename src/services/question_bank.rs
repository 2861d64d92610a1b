//! The statically bundled question bank, partitioned by category.

use crate::types::quiz::Question;

/// Category-partitioned question bank.
///
/// Categories keep their bundled order for the category selector; the quiz
/// engine shuffles question order per session.
pub struct QuestionBank {
    categories: Vec<(String, Vec<Question>)>,
}

impl QuestionBank {
    /// The bundled bank shipped with the popup.
    pub fn builtin() -> Self {
        let q = |text: &str, options: &[&str], correct: usize| Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        };

        let categories = vec![
            (
                "general".to_string(),
                vec![
                    q(
                        "What is the largest planet in our solar system?",
                        &["Earth", "Jupiter", "Saturn", "Neptune"],
                        1,
                    ),
                    q(
                        "Which element has the chemical symbol 'O'?",
                        &["Gold", "Oxygen", "Silver", "Iron"],
                        1,
                    ),
                    q(
                        "What is the capital of Australia?",
                        &["Sydney", "Melbourne", "Canberra", "Perth"],
                        2,
                    ),
                    q(
                        "In which year did World War II end?",
                        &["1944", "1945", "1946", "1947"],
                        1,
                    ),
                    q(
                        "What is the smallest unit of matter?",
                        &["Molecule", "Atom", "Electron", "Proton"],
                        1,
                    ),
                ],
            ),
            (
                "science".to_string(),
                vec![
                    q(
                        "What is the speed of light in vacuum?",
                        &[
                            "299,792,458 m/s",
                            "300,000,000 m/s",
                            "299,000,000 m/s",
                            "298,792,458 m/s",
                        ],
                        0,
                    ),
                    q(
                        "Which scientist developed the theory of relativity?",
                        &["Newton", "Einstein", "Galileo", "Darwin"],
                        1,
                    ),
                    q(
                        "What is the chemical formula for water?",
                        &["H2O", "CO2", "NaCl", "CH4"],
                        0,
                    ),
                ],
            ),
            (
                "history".to_string(),
                vec![
                    q(
                        "Who was the first person to walk on the moon?",
                        &["Buzz Aldrin", "Neil Armstrong", "John Glenn", "Alan Shepard"],
                        1,
                    ),
                    q(
                        "In which year did the Berlin Wall fall?",
                        &["1987", "1988", "1989", "1990"],
                        2,
                    ),
                ],
            ),
            (
                "technology".to_string(),
                vec![
                    q(
                        "Who founded Microsoft?",
                        &["Steve Jobs", "Bill Gates", "Mark Zuckerberg", "Larry Page"],
                        1,
                    ),
                    q(
                        "What does 'HTTP' stand for?",
                        &[
                            "HyperText Transfer Protocol",
                            "High Tech Transfer Protocol",
                            "HyperText Transport Protocol",
                            "High Transfer Text Protocol",
                        ],
                        0,
                    ),
                ],
            ),
            (
                "sports".to_string(),
                vec![
                    q(
                        "How many players are on a basketball team on the court at one time?",
                        &["4", "5", "6", "7"],
                        1,
                    ),
                    q(
                        "Which country has won the most FIFA World Cups?",
                        &["Germany", "Argentina", "Brazil", "Italy"],
                        2,
                    ),
                ],
            ),
        ];

        Self { categories }
    }

    /// Category names in bundled order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Questions for a category, or `None` for an unknown name.
    pub fn questions(&self, category: &str) -> Option<&[Question]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, questions)| questions.as_slice())
    }
}
