//! User playlists in the `playlists` collection.

use crate::client::{execute, fetch_json};
use crate::error::Result;
use crate::songs::SongsClient;
use crate::types::{NamePatch, SongIdsPatch};
use reqwest::Client;
use tracing::{debug, info};
use tunify_core::{NewPlaylist, Playlist, PlaylistId, Track, TrackId, UserId};

/// Playlists client.
pub struct PlaylistsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get the playlists owned by a user.
    pub async fn for_user(&self, user: &UserId) -> Result<Vec<Playlist>> {
        let url = format!("{}/playlists", self.base_url);
        fetch_json(
            self.http.get(&url).query(&[("userId", user.as_str())]),
            &url,
            "playlists",
        )
        .await
    }

    /// Get a playlist by id.
    pub async fn get(&self, id: &PlaylistId) -> Result<Playlist> {
        let url = format!("{}/playlists/{}", self.base_url, id);
        fetch_json(self.http.get(&url), &url, "playlist").await
    }

    /// Create a playlist, optionally seeded with tracks.
    pub async fn create(
        &self,
        user: &UserId,
        name: &str,
        initial_tracks: &[TrackId],
    ) -> Result<Playlist> {
        let draft = initial_tracks.iter().cloned().fold(
            Playlist::draft(user.clone(), name.trim()),
            NewPlaylist::with_track,
        );
        let url = format!("{}/playlists", self.base_url);
        let playlist: Playlist =
            fetch_json(self.http.post(&url).json(&draft), &url, "created playlist").await?;
        info!(playlist_id = %playlist.id, name = %playlist.name, "Created playlist");
        Ok(playlist)
    }

    /// Rename a playlist.
    pub async fn rename(&self, id: &PlaylistId, name: &str) -> Result<Playlist> {
        let url = format!("{}/playlists/{}", self.base_url, id);
        let body = NamePatch { name: name.trim() };
        fetch_json(self.http.patch(&url).json(&body), &url, "playlist").await
    }

    /// Delete a playlist.
    pub async fn delete(&self, id: &PlaylistId) -> Result<()> {
        let url = format!("{}/playlists/{}", self.base_url, id);
        execute(self.http.delete(&url), &url).await?;
        info!(playlist_id = %id, "Deleted playlist");
        Ok(())
    }

    /// Add a track, skipping it if already present.
    pub async fn add_track(&self, playlist: &Playlist, track: &TrackId) -> Result<Playlist> {
        self.set_tracks(&playlist.id, &playlist.with_track(track))
            .await
    }

    /// Add a track to several playlists, in order.
    pub async fn add_track_to_many(
        &self,
        playlists: &[Playlist],
        track: &TrackId,
    ) -> Result<Vec<Playlist>> {
        let mut updated = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            updated.push(self.add_track(playlist, track).await?);
        }
        Ok(updated)
    }

    /// Remove a track.
    pub async fn remove_track(&self, playlist: &Playlist, track: &TrackId) -> Result<Playlist> {
        self.set_tracks(&playlist.id, &playlist.without_track(track))
            .await
    }

    /// Resolve the playlist's track ids against the catalog.
    ///
    /// Ids missing from the catalog are skipped; playlist order is kept.
    pub async fn tracks(&self, playlist: &Playlist) -> Result<Vec<Track>> {
        let catalog = SongsClient::new(self.http, self.base_url).list().await?;
        let tracks: Vec<Track> = playlist
            .song_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|t| &t.id == id).cloned())
            .collect();
        debug!(
            playlist_id = %playlist.id,
            resolved = tracks.len(),
            total = playlist.song_ids.len(),
            "Resolved playlist tracks"
        );
        Ok(tracks)
    }

    async fn set_tracks(&self, id: &PlaylistId, song_ids: &[TrackId]) -> Result<Playlist> {
        let url = format!("{}/playlists/{}", self.base_url, id);
        let body = SongIdsPatch { song_ids };
        fetch_json(self.http.patch(&url).json(&body), &url, "playlist").await
    }
}
