use crate::error::FetchError;
use crate::models::Country;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for the public country catalog.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    client: reqwest::Client,
    url: String,
}

impl CountryCatalog {
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn try_fetch(&self) -> Result<Vec<Country>, FetchError> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        parse_catalog(&body)
    }

    /// Fetch, filter and sort the catalog. Any failure yields an empty list.
    pub async fn fetch_countries(&self) -> Vec<Country> {
        match self.try_fetch().await {
            Ok(countries) => {
                let total = countries.len();
                let complete = filter_complete(countries);
                tracing::info!(
                    "Fetched {} countries ({} with capital and currency)",
                    total,
                    complete.len()
                );
                complete
            }
            Err(e) => {
                tracing::error!("Error fetching countries: {}", e);
                Vec::new()
            }
        }
    }
}

pub fn parse_catalog(body: &str) -> Result<Vec<Country>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Keep entries with a non-empty capital list and currency map, sorted by common name.
pub fn filter_complete(countries: Vec<Country>) -> Vec<Country> {
    let mut complete: Vec<Country> = countries.into_iter().filter(Country::is_complete).collect();
    complete.sort_by(|a, b| a.common_name().cmp(b.common_name()));
    complete
}

/// Case-insensitive match on common name or first capital.
pub fn search<'a>(countries: &'a [Country], term: &str) -> Vec<&'a Country> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return countries.iter().collect();
    }

    countries
        .iter()
        .filter(|c| {
            c.common_name().to_lowercase().contains(&needle)
                || c
                    .primary_capital()
                    .is_some_and(|cap| cap.to_lowercase().contains(&needle))
        })
        .collect()
}

pub fn format_population(population: u64) -> String {
    format!("{:.1}M people", population as f64 / 1_000_000.0)
}
