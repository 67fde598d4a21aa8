//! Verticals API client
//!
//! Looks up site verticals with `GET {base_url}/verticals?search=<term>&limit=<n>`.

use std::time::Duration;

use super::{FetchError, Fetcher};
use crate::config::ApiConfig;
use crate::suggestion::{Suggestion, VerticalRecord};

const VERTICALS_PATH: &str = "verticals";

/// HTTP client for the verticals endpoint
#[derive(Debug, Clone)]
pub struct VerticalsClient {
    http: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl VerticalsClient {
    /// Create a new client
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(base_url: &str, limit: u32, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(FetchError::NotConfigured(
                "Missing or empty base_url in [api] config".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::NotConfigured(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            limit,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(&config.base_url, config.limit, config.timeout())
    }

    /// Full URL of the verticals endpoint, without query parameters
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, VERTICALS_PATH)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Search verticals matching `term`, in server order
    pub async fn search(&self, term: &str) -> Result<Vec<Suggestion>, FetchError> {
        let limit = self.limit.to_string();
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("search", term), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let records: Vec<VerticalRecord> = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(records.into_iter().map(Suggestion::from).collect())
    }
}

impl Fetcher for VerticalsClient {
    type Output = Vec<Suggestion>;

    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        self.search(query).await
    }
}

#[cfg(test)]
#[path = "verticals_tests.rs"]
mod verticals_tests;
