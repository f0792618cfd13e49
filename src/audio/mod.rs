pub mod player;
pub mod tones;

pub use player::TonePlayer;
pub use tones::{SAMPLE_RATE, ToneRecipe, Voice, Waveform, render};

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Moments in a quiz session that get an audible cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    Correct,
    Incorrect,
    LevelUp,
    Trophy,
}

impl fmt::Display for FeedbackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackEvent::Correct => write!(f, "Correct"),
            FeedbackEvent::Incorrect => write!(f, "Incorrect"),
            FeedbackEvent::LevelUp => write!(f, "Level Up"),
            FeedbackEvent::Trophy => write!(f, "Trophy"),
        }
    }
}

/// Capability handed to the quiz engine for emitting cues.
pub trait FeedbackPort: Send + Sync {
    fn emit(&self, event: FeedbackEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackPort for SilentFeedback {
    fn emit(&self, _event: FeedbackEvent) {}
}

/// Mute switch in front of another port. Clones share the same switch.
#[derive(Clone)]
pub struct SoundToggle {
    inner: Arc<dyn FeedbackPort>,
    enabled: Arc<AtomicBool>,
}

impl SoundToggle {
    pub fn new(inner: Arc<dyn FeedbackPort>, enabled: bool) -> Self {
        Self {
            inner,
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn toggle(&self) -> bool {
        let now = !self.is_enabled();
        self.set_enabled(now);
        tracing::debug!("Sound {}", if now { "enabled" } else { "disabled" });
        now
    }
}

impl FeedbackPort for SoundToggle {
    fn emit(&self, event: FeedbackEvent) {
        if self.is_enabled() {
            self.inner.emit(event);
        }
    }
}

/// Records every emitted event. Used by tests to observe the engine.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeedback {
    events: Arc<std::sync::Mutex<Vec<FeedbackEvent>>>,
}

impl RecordingFeedback {
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl FeedbackPort for RecordingFeedback {
    fn emit(&self, event: FeedbackEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
