//! Command handlers.
//!
//! Every handler returns data instead of printing so the binary decides on
//! presentation.

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use tracing::{debug, info};
use tunify_client::{Catalog, DataStoreClient, SearchClient, SearchSource, SessionStore};
use tunify_core::{Category, HistoryEntry, Playlist, PlaylistId, Track, TrackId, User};

/// Clients plus the persisted session.
#[derive(Debug)]
pub struct App {
    client: DataStoreClient,
    catalog: Catalog,
    session: SessionStore,
    search_limit: u32,
}

impl App {
    /// Build the clients and restore the session file.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client_config = config.client_config();
        let client = DataStoreClient::new(client_config.clone())?;
        let search = SearchClient::new(&client_config)?;
        let catalog = Catalog::new(client.clone(), search).with_limit(config.search_limit);
        let session = SessionStore::with_persistence(&config.session_file)?;

        Ok(Self {
            client,
            catalog,
            session,
            search_limit: config.search_limit,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ===== Account =====

    /// Create an account. The user still has to log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        Ok(self.client.auth().register(username, password).await?)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        Ok(self.session.login(&self.client, username, password).await?)
    }

    /// Forget the signed-in user, returning who that was.
    pub fn logout(&self) -> Option<User> {
        let user = self.session.current();
        self.session.logout();
        user
    }

    /// The signed-in profile, re-read from the data store.
    pub async fn whoami(&self) -> Result<User> {
        self.signed_in().await
    }

    // ===== Catalog =====

    pub async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.client.categories().list().await?)
    }

    pub async fn category(&self, slug: &str, local: bool) -> Result<Vec<Track>> {
        Ok(self.catalog.songs_for_category(slug, source(local)).await?)
    }

    /// Search by term; `limit` overrides the configured result count.
    pub async fn search(&self, term: &str, local: bool, limit: Option<u32>) -> Result<Vec<Track>> {
        match limit {
            Some(limit) if limit != self.search_limit => Ok(self
                .catalog
                .clone()
                .with_limit(limit)
                .search(term, source(local))
                .await?),
            _ => Ok(self.catalog.search(term, source(local)).await?),
        }
    }

    // ===== Likes =====

    pub async fn liked(&self) -> Result<Vec<Track>> {
        let user = self.signed_in().await?;
        Ok(self.client.songs().liked_songs(&user).await?)
    }

    /// Like a track from the catalog, or from the results of `search_term`
    /// when it is not stored yet.
    pub async fn like(&self, track_id: &str, search_term: Option<&str>) -> Result<Track> {
        let user = self.signed_in().await?;
        let id = TrackId::new(track_id);

        let track = match self.client.songs().get(&id).await? {
            Some(track) => track,
            None => {
                let term = search_term.ok_or_else(|| CliError::TrackNotFound(track_id.into()))?;
                self.catalog
                    .search(term, SearchSource::Online)
                    .await?
                    .into_iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| CliError::TrackNotFound(track_id.into()))?
            }
        };

        let updated = self.client.users().like(&user, &track).await?;
        self.session.update_user(updated);
        info!(track_id = %track.id, "Liked song");
        Ok(track)
    }

    pub async fn unlike(&self, track_id: &str) -> Result<()> {
        let user = self.signed_in().await?;
        let updated = self
            .client
            .users()
            .unlike(&user, &TrackId::new(track_id))
            .await?;
        self.session.update_user(updated);
        Ok(())
    }

    // ===== Playlists =====

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        let user = self.signed_in().await?;
        Ok(self.client.playlists().for_user(&user.id).await?)
    }

    /// A playlist with its tracks resolved.
    pub async fn playlist(&self, id: &str) -> Result<(Playlist, Vec<Track>)> {
        let playlist = self.owned_playlist(id).await?;
        let tracks = self.client.playlists().tracks(&playlist).await?;
        Ok((playlist, tracks))
    }

    pub async fn create_playlist(&self, name: &str, tracks: &[String]) -> Result<Playlist> {
        let user = self.signed_in().await?;
        let tracks: Vec<TrackId> = tracks.iter().map(TrackId::new).collect();
        Ok(self
            .client
            .playlists()
            .create(&user.id, name, &tracks)
            .await?)
    }

    pub async fn rename_playlist(&self, id: &str, name: &str) -> Result<Playlist> {
        let playlist = self.owned_playlist(id).await?;
        Ok(self.client.playlists().rename(&playlist.id, name).await?)
    }

    pub async fn delete_playlist(&self, id: &str) -> Result<Playlist> {
        let playlist = self.owned_playlist(id).await?;
        self.client.playlists().delete(&playlist.id).await?;
        Ok(playlist)
    }

    /// Add a track to one or more playlists.
    pub async fn add_to_playlists(&self, track_id: &str, ids: &[String]) -> Result<Vec<Playlist>> {
        let mut targets = Vec::with_capacity(ids.len());
        for id in ids {
            targets.push(self.owned_playlist(id).await?);
        }
        Ok(self
            .client
            .playlists()
            .add_track_to_many(&targets, &TrackId::new(track_id))
            .await?)
    }

    pub async fn remove_from_playlist(&self, id: &str, track_id: &str) -> Result<Playlist> {
        let playlist = self.owned_playlist(id).await?;
        Ok(self
            .client
            .playlists()
            .remove_track(&playlist, &TrackId::new(track_id))
            .await?)
    }

    // ===== History =====

    /// Play history, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let user = self.signed_in().await?;
        Ok(user.recent_history().cloned().collect())
    }

    pub async fn clear_history(&self) -> Result<()> {
        let user = self.signed_in().await?;
        let updated = self.client.users().clear_history(&user).await?;
        self.session.update_user(updated);
        Ok(())
    }

    /// Remove the entry at a 1-based position of [`App::history`].
    ///
    /// Entries equal to it by the profile matching rule go too.
    pub async fn remove_history(&self, position: usize) -> Result<HistoryEntry> {
        let user = self.signed_in().await?;
        let entry = position
            .checked_sub(1)
            .and_then(|i| user.recent_history().nth(i))
            .cloned()
            .ok_or(CliError::HistoryIndex(position))?;

        let updated = self
            .client
            .users()
            .remove_history_entry(&user, &entry)
            .await?;
        self.session.update_user(updated);
        Ok(entry)
    }

    // ===== Helpers =====

    /// Refresh and return the signed-in profile.
    async fn signed_in(&self) -> Result<User> {
        self.session.require()?;
        self.session
            .refresh(&self.client)
            .await?
            .ok_or_else(|| tunify_client::ClientError::NotLoggedIn.into())
    }

    /// Fetch a playlist, hiding playlists owned by other users.
    async fn owned_playlist(&self, id: &str) -> Result<Playlist> {
        let user = self.signed_in().await?;
        let id = PlaylistId::new(id);
        match self.client.playlists().get(&id).await {
            Ok(playlist) if playlist.user_id == user.id => Ok(playlist),
            Ok(_) | Err(tunify_client::ClientError::NotFound(_)) => {
                debug!(playlist_id = %id, "Playlist missing or not owned");
                Err(CliError::PlaylistNotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn source(local: bool) -> SearchSource {
    if local {
        SearchSource::Local
    } else {
        SearchSource::Online
    }
}
