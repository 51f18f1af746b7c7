//! Combined view over the search API and the data store catalog.

use crate::client::DataStoreClient;
use crate::error::Result;
use crate::search::SearchClient;
use crate::types::DEFAULT_SEARCH_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::warn;
use tunify_core::Track;

/// Where track lookups are served from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    /// The track search API
    #[default]
    Online,
    /// The data store's `songs` collection
    Local,
}

/// Track lookups that prefer the search API and fall back to the store.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: DataStoreClient,
    search: SearchClient,
    limit: u32,
}

impl Catalog {
    /// Create a catalog from both clients.
    pub fn new(store: DataStoreClient, search: SearchClient) -> Self {
        Self {
            store,
            search,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Set the number of results requested from the search API.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Get the data store client.
    pub fn store(&self) -> &DataStoreClient {
        &self.store
    }

    /// Tracks for a category.
    ///
    /// Online lookups that fail fall back to the songs stored under the
    /// category.
    pub async fn songs_for_category(&self, slug: &str, source: SearchSource) -> Result<Vec<Track>> {
        if source == SearchSource::Online {
            match self.search.search(slug, self.limit).await {
                Ok(tracks) => return Ok(tracks),
                Err(e) => {
                    warn!(
                        category = %slug,
                        status = ?e.status(),
                        error = %e,
                        "Online lookup failed, using stored songs"
                    );
                }
            }
        }
        self.store.songs().by_category(slug).await
    }

    /// Tracks whose title or artist contains `term`.
    pub async fn search(&self, term: &str, source: SearchSource) -> Result<Vec<Track>> {
        match source {
            SearchSource::Online => self.search.browse(term, self.limit).await,
            SearchSource::Local => self.store.songs().search_local(term).await,
        }
    }
}
