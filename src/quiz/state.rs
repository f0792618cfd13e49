//! Quiz progression as a pure state machine.
//!
//! `Answering` covers both waiting for an answer and showing the result of
//! one. `LevelComplete` pauses between levels and `Finished` is terminal until
//! the session is regenerated.

use crate::audio::FeedbackEvent;
use crate::quiz::Question;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub answer: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Answering { selection: Option<Selection> },
    LevelComplete,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Submit(String),
    Advance,
    AcknowledgeLevel,
}

/// Side effects requested by a transition. The caller performs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub applied: bool,
    pub feedback: Option<FeedbackEvent>,
    pub schedule_auto_advance: bool,
}

impl Outcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn applied(feedback: Option<FeedbackEvent>) -> Self {
        Self {
            applied: true,
            feedback,
            schedule_auto_advance: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizState {
    questions: Vec<Question>,
    questions_per_level: usize,
    current_index: usize,
    score: usize,
    level: usize,
    combo: usize,
    phase: QuizPhase,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new(Vec::new(), 1)
    }
}

impl QuizState {
    pub fn new(questions: Vec<Question>, questions_per_level: usize) -> Self {
        let phase = if questions.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Answering { selection: None }
        };
        Self {
            questions,
            questions_per_level: questions_per_level.max(1),
            current_index: 0,
            score: 0,
            level: 1,
            combo: 0,
            phase,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn questions_per_level(&self) -> usize {
        self.questions_per_level
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn combo(&self) -> usize {
        self.combo
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            QuizPhase::Answering { selection } => selection.as_ref(),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    pub fn show_level_up(&self) -> bool {
        self.phase == QuizPhase::LevelComplete
    }

    /// 1-based position inside the current level.
    pub fn step_in_level(&self) -> usize {
        self.current_index % self.questions_per_level + 1
    }

    /// Whether the current question closes its level.
    pub fn is_last_in_level(&self) -> bool {
        (self.current_index + 1) % self.questions_per_level == 0
    }

    /// Percentage of all questions up to the end of the current level answered correctly.
    pub fn level_accuracy(&self) -> u32 {
        percent(self.score, self.level * self.questions_per_level)
    }

    pub fn final_accuracy(&self) -> u32 {
        percent(self.score, self.questions.len())
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Apply one event. Events that do not fit the current phase leave the state untouched.
pub fn transition(mut state: QuizState, event: QuizEvent) -> (QuizState, Outcome) {
    let outcome = match (state.phase.clone(), event) {
        (QuizPhase::Answering { selection: None }, QuizEvent::Submit(answer)) => {
            let correct = match state.questions.get(state.current_index) {
                Some(question) => question.is_correct(&answer),
                None => return (state, Outcome::ignored()),
            };
            let feedback = if correct {
                state.score += 1;
                state.combo += 1;
                FeedbackEvent::Correct
            } else {
                state.combo = 0;
                FeedbackEvent::Incorrect
            };
            state.phase = QuizPhase::Answering {
                selection: Some(Selection { answer, correct }),
            };
            Outcome {
                applied: true,
                feedback: Some(feedback),
                schedule_auto_advance: true,
            }
        }
        (QuizPhase::Answering { selection: Some(_) }, QuizEvent::Advance) => {
            let next = state.current_index + 1;
            if next >= state.questions.len() {
                state.phase = QuizPhase::Finished;
                Outcome::applied(Some(FeedbackEvent::Trophy))
            } else if next % state.questions_per_level == 0 {
                state.phase = QuizPhase::LevelComplete;
                Outcome::applied(Some(FeedbackEvent::LevelUp))
            } else {
                state.current_index = next;
                state.phase = QuizPhase::Answering { selection: None };
                Outcome::applied(None)
            }
        }
        (QuizPhase::LevelComplete, QuizEvent::AcknowledgeLevel) => {
            state.current_index += 1;
            state.level += 1;
            state.phase = QuizPhase::Answering { selection: None };
            Outcome::applied(None)
        }
        _ => Outcome::ignored(),
    };

    (state, outcome)
}
