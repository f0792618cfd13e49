use crate::ai::{FactSource, MissingCredentialSource, ModelConfig, OpenRouterClient, get_country_fact};
use crate::config::AppConfig;
use crate::countries::CountryCatalog;
use crate::models::{FetchRequest, FetchResponse};
use crossbeam_channel::{Receiver, Sender};
use std::thread;

/// The network-facing services the worker calls into.
pub struct FetchSources {
    pub catalog: Option<CountryCatalog>,
    pub facts: Box<dyn FactSource>,
}

impl FetchSources {
    pub fn from_config(config: &AppConfig) -> Self {
        let catalog = match CountryCatalog::new(&config.countries_url) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                tracing::error!("Failed to build catalog client: {}", e);
                None
            }
        };

        let facts: Box<dyn FactSource> = if config.ai_enabled() {
            match OpenRouterClient::new(ModelConfig::for_model(&config.fact_model)) {
                Ok(client) => Box::new(client),
                Err(e) => {
                    tracing::warn!("{}; AI insights disabled", e);
                    Box::new(MissingCredentialSource)
                }
            }
        } else {
            tracing::info!("OPENROUTER_API_KEY not set; AI insights will use fallbacks");
            Box::new(MissingCredentialSource)
        };

        Self { catalog, facts }
    }
}

/// Run network calls off the UI thread. The worker exits once the request
/// sender is dropped.
pub fn spawn_fetch_worker(
    response_tx: Sender<FetchResponse>,
    request_rx: Receiver<FetchRequest>,
    sources: FetchSources,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("global-explorer::fetch_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start fetch runtime: {}", e);
                    // Still answer so the UI leaves the loading screen
                    for request in request_rx.iter() {
                        let _ = response_tx.send(fallback_response(request));
                    }
                    return;
                }
            };

            for request in request_rx.iter() {
                let response = match request {
                    FetchRequest::LoadCountries => {
                        tracing::info!("Worker loading country catalog");
                        let countries = match &sources.catalog {
                            Some(catalog) => rt.block_on(catalog.fetch_countries()),
                            None => Vec::new(),
                        };
                        FetchResponse::Countries(countries)
                    }
                    FetchRequest::Fact { country } => {
                        tracing::debug!("Worker fetching fact for {}", country);
                        let text = rt.block_on(get_country_fact(sources.facts.as_ref(), &country));
                        FetchResponse::Fact { country, text }
                    }
                };

                if response_tx.send(response).is_err() {
                    tracing::debug!("Response receiver dropped");
                    break;
                }
            }
            tracing::debug!("Fetch worker channel disconnected, exiting");
        })
}

fn fallback_response(request: FetchRequest) -> FetchResponse {
    match request {
        FetchRequest::LoadCountries => FetchResponse::Countries(Vec::new()),
        FetchRequest::Fact { country } => FetchResponse::Fact {
            country,
            text: crate::ai::FAILURE_FALLBACK.to_string(),
        },
    }
}
