pub mod client;
pub mod facts;

// Public API exports
pub use client::{DEFAULT_MODEL, ModelConfig, OpenRouterClient};
pub use facts::{
    EMPTY_RESPONSE_FALLBACK, FAILURE_FALLBACK, FactSource, MissingCredentialSource,
    get_country_fact, normalize_fact,
};
