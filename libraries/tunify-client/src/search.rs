//! Track search against an iTunes-style search API.

use crate::client::{http_client, normalize_url, send};
use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, SearchItem, SearchResponse};
use reqwest::Client;
use tracing::debug;
use tunify_core::{Track, TrackId};

/// Search API client.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    endpoint: String,
}

impl SearchClient {
    /// Create a search client for the configured endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = normalize_url(&config.search_url)?;
        let http = http_client(config)?;
        Ok(Self { http, endpoint })
    }

    /// Get the search endpoint.
    pub fn url(&self) -> &str {
        &self.endpoint
    }

    /// Search for tracks matching `term`.
    ///
    /// Candidates without a preview URL are discarded. Each track is tagged
    /// with the search term as its category.
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<Track>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ClientError::InvalidInput("Search term cannot be empty".into()));
        }

        debug!(url = %self.endpoint, term = %term, limit, "Searching tracks");
        let limit = limit.to_string();
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("term", term), ("media", "music"), ("limit", limit.as_str())]);
        let response = send(request, &self.endpoint).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: "Failed to fetch from search API".to_string(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse search response: {e}"))
        })?;

        let tracks: Vec<Track> = body
            .results
            .into_iter()
            .filter_map(|item| map_item(item, term))
            .collect();
        debug!(
            reported = body.result_count,
            kept = tracks.len(),
            "Search finished"
        );
        Ok(tracks)
    }

    /// Search, then keep only tracks whose title or artist contains `term`.
    pub async fn browse(&self, term: &str, limit: u32) -> Result<Vec<Track>> {
        Ok(self
            .search(term, limit)
            .await?
            .into_iter()
            .filter(|t| t.matches_term(term))
            .collect())
    }
}

/// Map a search candidate onto a track; `None` when it cannot be played.
fn map_item(item: SearchItem, category: &str) -> Option<Track> {
    let audio_url = item.preview_url.filter(|u| !u.is_empty())?;
    let id = match item.track_id? {
        serde_json::Value::String(s) => TrackId::new(s),
        serde_json::Value::Number(n) => TrackId::new(n.to_string()),
        _ => return None,
    };

    Some(
        Track::new(
            id,
            item.track_name.unwrap_or_default(),
            item.artist_name.unwrap_or_default(),
            audio_url,
        )
        .with_category(category)
        .with_cover(item.artwork_url_100.unwrap_or_default()),
    )
}
