//! Song catalog in the `songs` collection.

use crate::client::{execute, fetch_json};
use crate::error::Result;
use reqwest::Client;
use tracing::{debug, warn};
use tunify_core::{Track, TrackId, User};

/// Songs client.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get every song in the catalog.
    pub async fn list(&self) -> Result<Vec<Track>> {
        let url = format!("{}/songs", self.base_url);
        let songs: Vec<Track> = fetch_json(self.http.get(&url), &url, "songs").await?;
        debug!(count = songs.len(), "Fetched songs");
        Ok(songs)
    }

    /// Get the songs tagged with a category.
    pub async fn by_category(&self, slug: &str) -> Result<Vec<Track>> {
        let url = format!("{}/songs", self.base_url);
        fetch_json(
            self.http.get(&url).query(&[("category", slug)]),
            &url,
            "songs",
        )
        .await
    }

    /// Find a song by id.
    pub async fn get(&self, id: &TrackId) -> Result<Option<Track>> {
        let url = format!("{}/songs", self.base_url);
        let matches: Vec<Track> = fetch_json(
            self.http.get(&url).query(&[("id", id.as_str())]),
            &url,
            "songs",
        )
        .await?;
        Ok(matches.into_iter().next())
    }

    /// Copy a track into the catalog unless it is already there.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn ensure_stored(&self, track: &Track) {
        if let Err(e) = self.try_ensure_stored(track).await {
            warn!(track_id = %track.id, error = %e, "Could not store song");
        }
    }

    async fn try_ensure_stored(&self, track: &Track) -> Result<()> {
        if self.get(&track.id).await?.is_some() {
            return Ok(());
        }
        let url = format!("{}/songs", self.base_url);
        debug!(track_id = %track.id, "Storing song");
        execute(self.http.post(&url).json(track), &url).await
    }

    /// Catalog songs whose title or artist contains `term` (case-insensitive).
    pub async fn search_local(&self, term: &str) -> Result<Vec<Track>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|t| t.matches_term(term))
            .collect())
    }

    /// Catalog songs the user has liked, in catalog order.
    pub async fn liked_songs(&self, user: &User) -> Result<Vec<Track>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|t| user.is_liked(&t.id))
            .collect())
    }
}
