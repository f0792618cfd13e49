use crate::ai::client::OpenRouterClient;
use crate::error::FactError;
use async_trait::async_trait;
use regex::Regex;

pub const EMPTY_RESPONSE_FALLBACK: &str = "A fascinating country with a rich cultural history.";
pub const FAILURE_FALLBACK: &str = "Explore the unique traditions and landmarks of this nation.";

lazy_static::lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Anything that can produce a short text fact for a country.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fact(&self, country_name: &str) -> Result<String, FactError>;
}

#[async_trait]
impl FactSource for OpenRouterClient {
    async fn fact(&self, country_name: &str) -> Result<String, FactError> {
        self.generate_fact(country_name).await
    }
}

/// Used when no credential is configured; every call fails gracefully.
#[derive(Debug, Default)]
pub struct MissingCredentialSource;

#[async_trait]
impl FactSource for MissingCredentialSource {
    async fn fact(&self, _country_name: &str) -> Result<String, FactError> {
        Err(FactError::MissingCredential)
    }
}

/// Collapse whitespace and strip wrapping quotes or markdown emphasis.
pub fn normalize_fact(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    collapsed
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '`' | '“' | '”'))
        .trim()
        .to_string()
}

/// Never fails: an empty answer and an error each map to their own fallback line.
pub async fn get_country_fact(source: &dyn FactSource, country_name: &str) -> String {
    match source.fact(country_name).await {
        Ok(text) => {
            let fact = normalize_fact(&text);
            if fact.is_empty() {
                tracing::warn!("Empty fact response for {}", country_name);
                EMPTY_RESPONSE_FALLBACK.to_string()
            } else {
                tracing::debug!("Fact for {}: {}", country_name, fact);
                fact
            }
        }
        Err(e) => {
            tracing::error!("Fact error for {}: {}", country_name, e);
            FAILURE_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
pub struct MockFactSource {
    response: Result<String, String>,
    delay: std::time::Duration,
}

#[cfg(test)]
impl MockFactSource {
    pub fn answering(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            delay: std::time::Duration::from_millis(10),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            response: Err(error.to_string()),
            delay: std::time::Duration::from_millis(10),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl FactSource for MockFactSource {
    async fn fact(&self, _country_name: &str) -> Result<String, FactError> {
        // Simulate network delay
        tokio::time::sleep(self.delay).await;
        self.response.clone().map_err(FactError::Api)
    }
}
