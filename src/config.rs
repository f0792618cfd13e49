use crate::ai::DEFAULT_MODEL;
use crate::quiz::QuizConfig;

pub const DEFAULT_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/all?fields=name,capital,currencies,flags,region,subregion,population,cca2";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub countries_url: String,
    pub fact_model: String,
    pub openrouter_api_key: Option<String>,
    pub levels: usize,
    pub questions_per_level: usize,
    pub sound_enabled: bool,
    /// Whether the terminal renders regional-indicator pairs as flags.
    pub flag_emoji: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            fact_model: DEFAULT_MODEL.to_string(),
            openrouter_api_key: None,
            levels: QuizConfig::DEFAULT_LEVELS,
            questions_per_level: QuizConfig::DEFAULT_QUESTIONS_PER_LEVEL,
            sound_enabled: true,
            flag_emoji: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            countries_url: lookup("GLOBAL_EXPLORER_COUNTRIES_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.countries_url),
            fact_model: lookup("GLOBAL_EXPLORER_FACT_MODEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.fact_model),
            openrouter_api_key: lookup("OPENROUTER_API_KEY").filter(|s| !s.trim().is_empty()),
            levels: parse_count(
                lookup("GLOBAL_EXPLORER_LEVELS"),
                "GLOBAL_EXPLORER_LEVELS",
                QuizConfig::MAX_LEVELS,
            )
            .unwrap_or(defaults.levels),
            questions_per_level: parse_count(
                lookup("GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL"),
                "GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL",
                QuizConfig::MAX_QUESTIONS_PER_LEVEL,
            )
            .unwrap_or(defaults.questions_per_level),
            sound_enabled: lookup("GLOBAL_EXPLORER_SOUND")
                .map(|v| is_switched_on(&v))
                .unwrap_or(defaults.sound_enabled),
            flag_emoji: lookup("GLOBAL_EXPLORER_FLAG_EMOJI")
                .map(|v| is_switched_on(&v))
                .unwrap_or(defaults.flag_emoji),
        };

        config.log_summary();
        config
    }

    pub fn quiz_config(&self) -> QuizConfig {
        QuizConfig {
            levels: self.levels,
            questions_per_level: self.questions_per_level,
            flag_questions: self.flag_emoji,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.openrouter_api_key.is_some()
    }

    fn log_summary(&self) {
        tracing::info!(
            countries_url = %self.countries_url,
            fact_model = %self.fact_model,
            ai_enabled = self.ai_enabled(),
            levels = self.levels,
            questions_per_level = self.questions_per_level,
            sound_enabled = self.sound_enabled,
            flag_emoji = self.flag_emoji,
            "Loaded configuration"
        );
    }
}

fn is_switched_on(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "off" | "0" | "false")
}

fn parse_count(raw: Option<String>, key: &str, max: usize) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Some(n),
        Ok(n) if n > max => {
            tracing::warn!("Ignoring {}={} above the limit of {}, using default", key, n, max);
            None
        }
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(config.fact_model, DEFAULT_MODEL);
        assert_eq!(config.levels, 10);
        assert_eq!(config.questions_per_level, 5);
        assert!(config.sound_enabled);
        assert!(config.quiz_config().flag_questions);
        assert!(!config.ai_enabled());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GLOBAL_EXPLORER_COUNTRIES_URL", "http://localhost:8080/all"),
            ("GLOBAL_EXPLORER_LEVELS", "3"),
            ("GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL", "4"),
            ("GLOBAL_EXPLORER_SOUND", "off"),
            ("OPENROUTER_API_KEY", "sk-test"),
        ]));
        assert_eq!(config.countries_url, "http://localhost:8080/all");
        assert_eq!(config.quiz_config().total_questions(), Some(12));
        assert!(!config.sound_enabled);
        assert!(config.ai_enabled());
    }

    #[test]
    fn test_invalid_counts_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GLOBAL_EXPLORER_LEVELS", "zero"),
            ("GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL", "0"),
        ]));
        assert_eq!(config.levels, 10);
        assert_eq!(config.questions_per_level, 5);
    }

    #[test]
    fn test_oversized_counts_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GLOBAL_EXPLORER_LEVELS", "18446744073709551615"),
            ("GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL", "100000000000"),
        ]));
        assert_eq!(config.levels, 10);
        assert_eq!(config.questions_per_level, 5);
        assert!(config.quiz_config().is_within_limits());

        let config = AppConfig::from_lookup(lookup_from(&[
            ("GLOBAL_EXPLORER_LEVELS", "100"),
            ("GLOBAL_EXPLORER_QUESTIONS_PER_LEVEL", "21"),
        ]));
        assert_eq!(config.levels, 100);
        assert_eq!(config.questions_per_level, 5);
    }

    #[test]
    fn test_flag_emoji_switch_disables_flag_questions() {
        let config = AppConfig::from_lookup(lookup_from(&[("GLOBAL_EXPLORER_FLAG_EMOJI", "off")]));
        assert!(!config.flag_emoji);
        assert!(!config.quiz_config().flag_questions);
    }

    #[test]
    fn test_blank_api_key_disables_ai() {
        let config = AppConfig::from_lookup(lookup_from(&[("OPENROUTER_API_KEY", "  ")]));
        assert!(!config.ai_enabled());
    }
}
