// Dune API client
//
// Fetches the latest results of a saved Dune query. One GET per call; no
// retries and no caching.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::config::DuneSettings;
use crate::defaults::DUNE_API_KEY_HEADER;
use crate::errors::DuneError;

/// Source of query results, keyed by Dune query id
#[async_trait]
pub trait QueryResultsSource: Send + Sync {
    /// Fetch the results document for `query_id`
    async fn query_results(&self, query_id: &str) -> Result<Value, DuneError>;
}

/// HTTP client for the Dune REST API
pub struct DuneClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
}

impl DuneClient {
    /// Create a new client for the given API base URL and key
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, DuneError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DuneError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DuneError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http_client: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &DuneSettings) -> Result<Self, DuneError> {
        Self::new(&settings.api_url, settings.api_key.clone())
    }

    /// `{base}/query/{query_id}/results`, with the id escaped as one segment
    pub fn results_url(&self, query_id: &str) -> Result<Url, DuneError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DuneError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["query", query_id, "results"]);
        Ok(url)
    }
}

#[async_trait]
impl QueryResultsSource for DuneClient {
    async fn query_results(&self, query_id: &str) -> Result<Value, DuneError> {
        let endpoint = self.results_url(query_id)?;
        log::debug!("Fetching Dune query results from {}", endpoint);

        let response = self
            .http_client
            .get(endpoint)
            .header(DUNE_API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(DuneError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DuneError::Status { status, body });
        }

        response.json::<Value>().await.map_err(DuneError::Decode)
    }
}
