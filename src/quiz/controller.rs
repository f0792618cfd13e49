use crate::audio::FeedbackPort;
use crate::error::QuizError;
use crate::models::Country;
use crate::quiz::scheduler::{CancelToken, Scheduler};
use crate::quiz::state::{Outcome, QuizEvent, QuizState, transition};
use crate::quiz::{QuizConfig, generate_questions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Owns one quiz session: its state, the pending auto-advance and the
/// feedback port. Dropping the controller discards any pending advance.
pub struct QuizController {
    countries: Arc<Vec<Country>>,
    config: QuizConfig,
    state: QuizState,
    feedback: Box<dyn FeedbackPort>,
    scheduler: Scheduler<QuizEvent>,
    pending_advance: Option<CancelToken>,
    rng: StdRng,
}

impl QuizController {
    pub fn new(
        countries: Arc<Vec<Country>>,
        config: QuizConfig,
        feedback: Box<dyn FeedbackPort>,
    ) -> Result<Self, QuizError> {
        Self::with_rng(countries, config, feedback, StdRng::from_entropy())
    }

    pub fn with_rng(
        countries: Arc<Vec<Country>>,
        config: QuizConfig,
        feedback: Box<dyn FeedbackPort>,
        mut rng: StdRng,
    ) -> Result<Self, QuizError> {
        let questions = generate_questions(&countries, config, &mut rng)?;
        Ok(Self {
            state: QuizState::new(questions, config.questions_per_level),
            countries,
            config,
            feedback,
            scheduler: Scheduler::new(),
            pending_advance: None,
            rng,
        })
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance
            .is_some_and(|token| self.scheduler.is_pending(token))
    }

    /// When the UI loop next needs to wake up for this session.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Submit an option. Ignored if the current question already has an answer.
    pub fn submit_answer(&mut self, answer: &str, now: Instant) {
        let outcome = self.apply(QuizEvent::Submit(answer.to_string()));
        if outcome.schedule_auto_advance {
            self.cancel_pending();
            self.pending_advance =
                Some(self.scheduler.schedule(now, AUTO_ADVANCE_DELAY, QuizEvent::Advance));
        }
    }

    /// Manual advance. Cancels the pending auto-advance so it cannot fire twice.
    pub fn advance(&mut self) {
        self.cancel_pending();
        self.apply(QuizEvent::Advance);
    }

    pub fn acknowledge_level(&mut self) {
        self.cancel_pending();
        self.apply(QuizEvent::AcknowledgeLevel);
    }

    /// Fire any due scheduled events. Returns true if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.scheduler.take_due(now);
        if due.is_empty() {
            return false;
        }
        self.pending_advance = None;

        let mut changed = false;
        for event in due {
            tracing::debug!("Auto-advance fired at question {}", self.state.current_index());
            changed |= self.apply(event).applied;
        }
        changed
    }

    /// Throw the session away and draw a fresh one from the same countries.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        self.cancel_pending();
        let questions = generate_questions(&self.countries, self.config, &mut self.rng)?;
        self.state = QuizState::new(questions, self.config.questions_per_level);
        tracing::info!("Quiz restarted");
        Ok(())
    }

    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.pending_advance.take()
            && self.scheduler.cancel(token)
        {
            tracing::debug!("Cancelled pending auto-advance");
        }
    }

    fn apply(&mut self, event: QuizEvent) -> Outcome {
        let state = std::mem::take(&mut self.state);
        let (state, outcome) = transition(state, event);
        self.state = state;

        if let Some(cue) = outcome.feedback {
            self.feedback.emit(cue);
        }
        if outcome.applied {
            tracing::debug!(
                index = self.state.current_index(),
                score = self.state.score(),
                level = self.state.level(),
                combo = self.state.combo(),
                phase = ?self.state.phase(),
                "Quiz transition"
            );
        }
        outcome
    }
}

impl Drop for QuizController {
    fn drop(&mut self) {
        self.cancel_pending();
        self.scheduler.clear();
    }
}
