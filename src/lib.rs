pub mod ai;
pub mod app;
pub mod audio;
pub mod config;
pub mod countries;
pub mod error;
pub mod fetch_worker;
pub mod input;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use ai::{FactSource, OpenRouterClient, get_country_fact};
pub use app::App;
pub use audio::{FeedbackEvent, FeedbackPort, SilentFeedback, SoundToggle, TonePlayer};
pub use config::AppConfig;
pub use countries::CountryCatalog;
pub use error::{AudioError, FactError, FetchError, QuizError};
pub use fetch_worker::{FetchSources, spawn_fetch_worker};
pub use input::handle_key;
pub use models::{AppMode, Country, FetchRequest, FetchResponse};
pub use quiz::{QuizConfig, QuizController, QuizState, generate_questions, transition};
pub use ui::draw;
