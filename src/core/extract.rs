use regex::Regex;
use thiserror::Error;
use crate::models::{CandidateRecord, SearchPage};

/// Marker carried by the script block that holds the result payload
pub const DEFAULT_MARKER: &str = "obituaryList";

/// Reasons a results page yields no payload
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No script block containing '{0}' found in the page")]
    MarkerNotFound(String),

    #[error("Could not find an HTML comment wrapping the payload")]
    CommentNotFound,

    #[error("Embedded payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Narrow parser for the results page.
///
/// Grammar: `<script ...>` whose text contains the marker, then `<!-- ... -->`
/// inside that script (greedy, spanning lines), then a JSON document.
#[derive(Debug, Clone)]
pub struct PayloadExtractor {
    script: Regex,
    comment: Regex,
    marker: String,
}

impl PayloadExtractor {
    pub fn new(marker: impl Into<String>) -> Result<Self, ExtractError> {
        Ok(Self {
            script: Regex::new(r"(?is)<script\b[^>]*>(.*?)</script\s*>")?,
            comment: Regex::new(r"(?s)<!--(.*)-->")?,
            marker: marker.into(),
        })
    }

    pub fn with_default_marker() -> Result<Self, ExtractError> {
        Self::new(DEFAULT_MARKER)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Text of the first script block carrying the marker
    fn marked_script<'a>(&self, html: &'a str) -> Option<&'a str> {
        self.script
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .find(|text| text.contains(self.marker.as_str()))
    }

    pub fn extract_payload(&self, html: &str) -> Result<SearchPage, ExtractError> {
        let script = self
            .marked_script(html)
            .ok_or_else(|| ExtractError::MarkerNotFound(self.marker.clone()))?;

        let json = self
            .comment
            .captures(script)
            .and_then(|caps| caps.get(1))
            .ok_or(ExtractError::CommentNotFound)?;

        Ok(serde_json::from_str(json.as_str())?)
    }

    pub fn extract_candidates(&self, html: &str) -> Result<Vec<CandidateRecord>, ExtractError> {
        Ok(self.extract_payload(html)?.into_candidates())
    }
}
