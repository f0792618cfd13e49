use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: String,
}

/// One catalog entry. Immutable once fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub cca2: String,
}

impl Country {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// First listed capital, if any.
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital
            .first()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }

    /// First currency by code order.
    pub fn primary_currency(&self) -> Option<&Currency> {
        self.currencies.values().next()
    }

    pub fn primary_currency_name(&self) -> Option<&str> {
        self.primary_currency()
            .map(|c| c.name.as_str())
            .filter(|n| !n.trim().is_empty())
    }

    /// Regional-indicator flag for the two-letter code, e.g. "FR" -> 🇫🇷.
    pub fn flag_emoji(&self) -> String {
        let code = self.cca2.trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return String::from("🏳");
        }
        code.to_ascii_uppercase()
            .chars()
            .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.primary_capital().is_some() && !self.currencies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    LoadCountries,
    Fact { country: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse {
    Countries(Vec<Country>),
    Fact { country: String, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Home,
    Learn,
    Study,
    Quiz,
}

impl AppMode {
    pub fn title(&self) -> &'static str {
        match self {
            AppMode::Home => "Home",
            AppMode::Learn => "Learn",
            AppMode::Study => "Flags",
            AppMode::Quiz => "Quiz",
        }
    }
}

#[cfg(test)]
pub(crate) fn test_country(name: &str, capital: &str, currency: &str, cca2: &str) -> Country {
    let mut currencies = BTreeMap::new();
    if !currency.is_empty() {
        currencies.insert(
            format!("{}X", cca2),
            Currency {
                name: currency.to_string(),
                symbol: "$".to_string(),
            },
        );
    }
    Country {
        name: CountryName {
            common: name.to_string(),
            official: format!("Republic of {}", name),
        },
        capital: if capital.is_empty() {
            vec![]
        } else {
            vec![capital.to_string()]
        },
        currencies,
        flags: Flags {
            png: format!("https://flagcdn.com/w320/{}.png", cca2.to_lowercase()),
            svg: format!("https://flagcdn.com/{}.svg", cca2.to_lowercase()),
            alt: format!("The flag of {}", name),
        },
        region: "Europe".to_string(),
        subregion: "Western Europe".to_string(),
        population: 1_000_000,
        cca2: cca2.to_string(),
    }
}
