//! Configuration and shared request types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default data store base URL
pub const DEFAULT_STORE_URL: &str = "http://localhost:3000";

/// Default track search endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";

/// Default number of search results requested
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

/// Configuration for connecting to the data store and the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST data store (e.g., "http://localhost:3000")
    pub store_url: String,
    /// Track search endpoint
    pub search_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for a data store URL with default search settings.
    pub fn new(store_url: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            ..Self::default()
        }
    }

    /// Use a different search endpoint.
    #[must_use]
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

// =============================================================================
// Data Store Types
// =============================================================================

/// Error body returned by the data store.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// Body for `PATCH /users/{id}` touching only the liked list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikedPatch<'a> {
    pub liked_song_ids: &'a [tunify_core::TrackId],
}

/// Body for `PATCH /users/{id}` touching only the history.
#[derive(Debug, Serialize)]
pub(crate) struct HistoryPatch<'a> {
    pub history: &'a [tunify_core::HistoryEntry],
}

/// Body for `PATCH /playlists/{id}` touching only the track list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SongIdsPatch<'a> {
    pub song_ids: &'a [tunify_core::TrackId],
}

/// Body for `PATCH /playlists/{id}` touching only the name.
#[derive(Debug, Serialize)]
pub(crate) struct NamePatch<'a> {
    pub name: &'a str,
}

// =============================================================================
// Search API Types
// =============================================================================

/// Envelope of a search API response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchItem>,
}

/// One search API candidate. Only the fields mapped onto a track are read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItem {
    pub track_id: Option<serde_json::Value>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub preview_url: Option<String>,
    #[serde(rename = "artworkUrl100")]
    pub artwork_url_100: Option<String>,
}
