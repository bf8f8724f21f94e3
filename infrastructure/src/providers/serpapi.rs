//! SerpAPI search adapter

use super::{api_key_from_env, transport_error};
use crate::config::FileSearchConfig;
use agenda_application::{ProviderError, SearchProvider};
use agenda_domain::SearchHit;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Google results through SerpAPI
pub struct SerpApiSearch {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    engine: String,
    max_results: usize,
}

impl SerpApiSearch {
    pub fn from_config(config: &FileSearchConfig) -> Result<Self, ProviderError> {
        let api_key = api_key_from_env(&config.api_key_env, "search")?;
        Self::new(api_key, config)
    }

    pub fn new(api_key: String, config: &FileSearchConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Misconfigured(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            engine: config.engine.clone(),
            max_results: config.max_results,
        })
    }

    fn hits_from(&self, response: SerpApiResponse) -> Result<Vec<SearchHit>, ProviderError> {
        if let Some(error) = response.error {
            // An empty result page is reported as an error too
            if error.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(ProviderError::MalformedResponse(error));
        }

        Ok(response
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .filter(|r| !r.link.is_empty())
            .take(self.max_results)
            .map(|r| SearchHit::new(r.title, r.link))
            .collect())
    }
}

#[async_trait]
impl SearchProvider for SerpApiSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        debug!(provider = "serpapi", engine = %self.engine, query, "Searching");

        let num = self.max_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("engine", self.engine.as_str()),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SerpApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        self.hits_from(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    organic_results: Option<Vec<OrganicResult>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(max_results: usize) -> SerpApiSearch {
        let config = FileSearchConfig {
            max_results,
            ..Default::default()
        };
        SerpApiSearch::new("test-key".to_string(), &config).unwrap()
    }

    #[test]
    fn test_hits_from_organic_results() {
        let response: SerpApiResponse = serde_json::from_str(
            r#"{"organic_results": [
                {"position": 1, "title": "Ada Lovelace - LinkedIn", "link": "https://linkedin.com/in/ada"},
                {"position": 2, "title": "No link"},
                {"position": 3, "title": "Grace Hopper", "link": "https://example.com/grace"},
                {"position": 4, "title": "Alan Turing", "link": "https://example.com/alan"}
            ]}"#,
        )
        .unwrap();

        let hits = search(2).hits_from(response).unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit::new("Ada Lovelace - LinkedIn", "https://linkedin.com/in/ada"),
                SearchHit::new("Grace Hopper", "https://example.com/grace"),
            ]
        );
    }

    #[test]
    fn test_hits_from_empty_page() {
        let response: SerpApiResponse = serde_json::from_str(
            r#"{"error": "Google hasn't returned any results for this query."}"#,
        )
        .unwrap();
        assert!(search(5).hits_from(response).unwrap().is_empty());
    }

    #[test]
    fn test_hits_from_api_error() {
        let response: SerpApiResponse =
            serde_json::from_str(r#"{"error": "Invalid API key."}"#).unwrap();
        assert!(matches!(
            search(5).hits_from(response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }
}
