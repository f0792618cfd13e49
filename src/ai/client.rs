use crate::error::FactError;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 256;

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    pub fn for_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_model(DEFAULT_MODEL)
    }
}

pub fn fact_prompt(country_name: &str) -> String {
    format!(
        "Provide one extremely interesting, surprising, and short fact about the country: {}. Keep it under 100 characters.",
        country_name
    )
}

impl OpenRouterClient {
    /// Reads the credential from `OPENROUTER_API_KEY`.
    pub fn new(config: ModelConfig) -> Result<Self, FactError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| FactError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub async fn generate_fact(&self, country_name: &str) -> Result<String, FactError> {
        let prompt = fact_prompt(country_name);

        let messages = vec![
            Message::text(
                "system",
                "You are a geography guide. Answer with a single plain-text sentence.",
            ),
            Message::text("user", &prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| FactError::Client(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| FactError::Api(e.to_string()))?;

        let choice = response.choices.first().ok_or(FactError::EmptyResponse)?;
        match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => Ok(text.clone()),
            openrouter_api::MessageContent::Parts(parts) => {
                let text_parts: Vec<String> = parts
                    .iter()
                    .filter_map(|p| {
                        if let openrouter_api::ContentPart::Text(tc) = p {
                            Some(tc.text.clone())
                        } else {
                            None
                        }
                    })
                    .collect();
                Ok(text_parts.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_prompt_embeds_country() {
        let prompt = fact_prompt("Japan");
        assert!(prompt.contains("about the country: Japan."));
        assert!(prompt.ends_with("Keep it under 100 characters."));
    }

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, Some(DEFAULT_MAX_TOKENS));

        let json = serde_json::to_value(ModelConfig {
            model: "x".to_string(),
            temperature: None,
            max_tokens: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"model": "x"}));
    }
}
