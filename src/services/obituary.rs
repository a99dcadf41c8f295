use crate::config::SearchSettings;
use crate::core::{ExtractError, PayloadExtractor};
use crate::models::CandidateRecord;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Errors that can occur when querying the obituary index
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Search returned status {0}")]
    Status(StatusCode),

    #[error("Invalid results page: {0}")]
    Extract(#[from] ExtractError),
}

impl SearchError {
    /// Network, timeout or status failures, as opposed to page parsing failures
    pub fn is_transport(&self) -> bool {
        matches!(self, SearchError::RequestError(_) | SearchError::Status(_))
    }
}

/// Obituary index client
///
/// Looks people up by first and last name only; the index has no other
/// query fields.
pub struct ObituaryClient {
    endpoint: String,
    client: Client,
    extractor: PayloadExtractor,
}

impl ObituaryClient {
    /// Create a new client with the configured timeout and User-Agent
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            client,
            extractor: PayloadExtractor::new(settings.marker.as_str())?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Search URL with URL-encoded `firstName` and `lastName` parameters
    pub fn search_url(&self, first_name: &str, last_name: &str) -> String {
        format!(
            "{}?firstName={}&lastName={}",
            self.endpoint,
            urlencoding::encode(first_name),
            urlencoding::encode(last_name)
        )
    }

    /// Fetch the raw results page
    pub async fn fetch_page(&self, first_name: &str, last_name: &str) -> Result<String, SearchError> {
        let url = self.search_url(first_name, last_name);

        tracing::debug!("Fetching search results from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the candidate list for a name
    pub async fn search(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<CandidateRecord>, SearchError> {
        let page = self.fetch_page(first_name, last_name).await?;
        Ok(self.extractor.extract_candidates(&page)?)
    }
}
