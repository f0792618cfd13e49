pub mod controller;
pub mod generator;
pub mod scheduler;
pub mod state;

pub use controller::{AUTO_ADVANCE_DELAY, QuizController};
pub use generator::{MIN_COUNTRIES, OPTIONS_PER_QUESTION, Question, QuestionKind, generate_questions};
pub use scheduler::{CancelToken, Scheduler};
pub use state::{Outcome, QuizEvent, QuizPhase, QuizState, Selection, transition};

/// Shape of a session: `levels` blocks of `questions_per_level` questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub levels: usize,
    pub questions_per_level: usize,
    /// Ask "which country owns this flag" questions. Off for terminals that
    /// print flag emoji as their two-letter country code.
    pub flag_questions: bool,
}

impl QuizConfig {
    pub const DEFAULT_LEVELS: usize = 10;
    pub const DEFAULT_QUESTIONS_PER_LEVEL: usize = 5;
    pub const MAX_LEVELS: usize = 100;
    pub const MAX_QUESTIONS_PER_LEVEL: usize = 20;

    /// `None` when the product overflows.
    pub fn total_questions(&self) -> Option<usize> {
        self.levels.checked_mul(self.questions_per_level)
    }

    pub fn is_within_limits(&self) -> bool {
        (1..=Self::MAX_LEVELS).contains(&self.levels)
            && (1..=Self::MAX_QUESTIONS_PER_LEVEL).contains(&self.questions_per_level)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            levels: Self::DEFAULT_LEVELS,
            questions_per_level: Self::DEFAULT_QUESTIONS_PER_LEVEL,
            flag_questions: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_questions_overflow_is_none() {
        let config = QuizConfig {
            levels: usize::MAX,
            ..QuizConfig::default()
        };
        assert_eq!(config.total_questions(), None);
        assert!(!config.is_within_limits());
        assert_eq!(QuizConfig::default().total_questions(), Some(50));
        assert!(QuizConfig::default().is_within_limits());
    }
}
