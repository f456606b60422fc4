//! subt.is API client
//!
//! Title search and subtitle body retrieval.
//! API root: https://api.subt.is/v1

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::http::{FetchError, HttpClient};
use crate::config::AddonConfig;
use crate::models::{PlaybackContext, SubtitleCandidate, SubtitleId, TitleType};

/// subt.is API client
#[derive(Debug, Clone)]
pub struct SubtisClient {
    http: HttpClient,
    base_url: String,
    search_timeout: Duration,
    download_timeout: Duration,
}

impl SubtisClient {
    pub fn new(config: &AddonConfig) -> Self {
        Self {
            http: HttpClient::new(&config.user_agent()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_timeout: config.search_timeout(),
            download_timeout: config.download_timeout(),
        }
    }

    /// Create a client with default settings against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&AddonConfig::with_base_url(base_url))
    }

    /// URL of the title search endpoint for `title`
    pub fn search_url(&self, title: &str) -> String {
        format!("{}/titles/search/{}", self.base_url, urlencoding::encode(title))
    }

    /// URL of the subtitle body endpoint for `id`
    pub fn link_url(&self, id: &SubtitleId) -> String {
        format!(
            "{}/subtitle/link/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    /// Search candidates for the playing title
    ///
    /// A blank title yields an empty list without touching the network.
    pub async fn try_search(
        &self,
        context: &PlaybackContext,
    ) -> Result<Vec<SubtitleCandidate>, FetchError> {
        let title = context.search_title();
        if title.is_empty() {
            info!(target: "subtis", "No title found, skipping search");
            return Ok(Vec::new());
        }

        debug!(
            target: "subtis",
            imdb_id = ?context.imdb_id,
            file_size = ?context.file_size,
            "Searching subtitles for '{}'",
            title
        );

        let response: SearchResponse = self
            .http
            .get_json(&self.search_url(title), self.search_timeout)
            .await?;

        info!(target: "subtis", "API returned {} total results", response.total_count());
        Ok(response.into_candidates())
    }

    /// Like [`try_search`](Self::try_search), but any failure is an empty list
    pub async fn search(&self, context: &PlaybackContext) -> Vec<SubtitleCandidate> {
        self.try_search(context).await.unwrap_or_else(|e| {
            warn!(target: "subtis", "Search failed: {}", e);
            Vec::new()
        })
    }

    /// Fetch the raw subtitle file for `id`
    pub async fn fetch_subtitle(&self, id: &SubtitleId) -> Result<String, FetchError> {
        self.http
            .get_text(&self.link_url(id), self.download_timeout)
            .await
    }
}

impl Default for SubtisClient {
    fn default() -> Self {
        Self::new(&AddonConfig::default())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Informational only, any shape is accepted
    #[serde(default)]
    total: Option<serde_json::Value>,
    #[serde(default)]
    results: Option<Vec<CandidateRaw>>,
}

impl SearchResponse {
    fn total_count(&self) -> u64 {
        self.total
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0)
    }

    fn into_candidates(self) -> Vec<SubtitleCandidate> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| r.into_candidate())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRaw {
    id: Option<SubtitleId>,
    title_name: Option<String>,
    title_name_spa: Option<String>,
    year: Option<serde_json::Value>,
    rating: Option<f64>,
    #[serde(rename = "type")]
    title_type: Option<TitleType>,
}

impl CandidateRaw {
    fn into_candidate(self) -> Option<SubtitleCandidate> {
        // Without a usable id there is nothing to download
        let id = match self.id {
            Some(id) if id.is_file_safe() => id,
            Some(id) if !id.is_empty() => {
                debug!(target: "subtis", "Skipping result with unusable id {:?}", id.as_str());
                return None;
            }
            _ => {
                debug!(target: "subtis", "Skipping result without id");
                return None;
            }
        };

        let title_name = self
            .title_name
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());
        let title_name_spa = self
            .title_name_spa
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title_name.clone());

        Some(SubtitleCandidate {
            id,
            title_name,
            title_name_spa,
            year: self.year.as_ref().and_then(parse_year),
            rating: self.rating.unwrap_or(0.0),
            title_type: self.title_type.unwrap_or_default(),
        })
    }
}

/// Years arrive as numbers, but tolerate "2010" and "2010-07-16"
fn parse_year(value: &serde_json::Value) -> Option<u16> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
        serde_json::Value::String(s) => s.get(..4).and_then(|y| y.parse().ok()),
        _ => None,
    }
}
