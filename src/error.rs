use thiserror::Error;

/// Errors raised when a quiz session cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Not enough countries to build a quiz: {available} available, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("Unsupported quiz size: {levels} levels of {questions_per_level} questions")]
    UnsupportedSize {
        levels: usize,
        questions_per_level: usize,
    },
}

/// Failures while loading the country catalog. Never leaves the data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog returned status {status}")]
    Status { status: u16 },

    #[error("Failed to parse catalog response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Failures while asking the text service for a country fact.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingCredential,

    #[error("Failed to create OpenRouter client: {0}")]
    Client(String),

    #[error("OpenRouter API error: {0}")]
    Api(String),

    #[error("No response choices received")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to initialize audio output stream: {0}")]
    StreamInit(String),

    #[error("Audio playback failed: {0}")]
    Playback(String),
}
