//! Profile records in the `users` collection.

use crate::client::fetch_json;
use crate::error::Result;
use crate::songs::SongsClient;
use crate::types::{HistoryPatch, LikedPatch};
use reqwest::Client;
use tracing::debug;
use tunify_core::{HistoryEntry, NewUser, Track, TrackId, User, UserId};

/// Users client.
///
/// Lists on the profile are always written back whole, the way the data
/// store expects.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Get a profile by id.
    pub async fn get(&self, id: &UserId) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        fetch_json(self.http.get(&url), &url, "user").await
    }

    /// Find the profile for a username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let url = format!("{}/users", self.base_url);
        let matches: Vec<User> = fetch_json(
            self.http.get(&url).query(&[("username", username)]),
            &url,
            "users",
        )
        .await?;
        Ok(matches.into_iter().next())
    }

    /// Create a profile.
    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let url = format!("{}/users", self.base_url);
        fetch_json(self.http.post(&url).json(user), &url, "created user").await
    }

    /// Return the profile for a username, creating an empty one if missing.
    pub async fn ensure_record(&self, username: &str) -> Result<User> {
        if let Some(user) = self.find_by_username(username).await? {
            return Ok(user);
        }
        debug!(username = %username, "Creating profile record");
        self.create(&NewUser::new(username)).await
    }

    /// Replace the liked list.
    pub async fn set_liked(&self, id: &UserId, liked: &[TrackId]) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        let body = LikedPatch {
            liked_song_ids: liked,
        };
        fetch_json(self.http.patch(&url).json(&body), &url, "user").await
    }

    /// Replace the history.
    pub async fn set_history(&self, id: &UserId, history: &[HistoryEntry]) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        let body = HistoryPatch { history };
        fetch_json(self.http.patch(&url).json(&body), &url, "user").await
    }

    /// Like a track.
    ///
    /// Tracks found through search are copied into the catalog first so the
    /// liked list can be resolved later.
    pub async fn like(&self, user: &User, track: &Track) -> Result<User> {
        self.songs().ensure_stored(track).await;
        self.set_liked(&user.id, &user.with_liked(&track.id)).await
    }

    /// Remove a track from the liked list.
    pub async fn unlike(&self, user: &User, track: &TrackId) -> Result<User> {
        self.set_liked(&user.id, &user.without_liked(track)).await
    }

    /// Append an entry to the history.
    pub async fn append_history(&self, user: &User, entry: HistoryEntry) -> Result<User> {
        let mut history = user.history.clone();
        history.push(entry);
        self.set_history(&user.id, &history).await
    }

    /// Remove every history entry.
    pub async fn clear_history(&self, user: &User) -> Result<User> {
        self.set_history(&user.id, &[]).await
    }

    /// Remove the entries matching `entry`.
    pub async fn remove_history_entry(&self, user: &User, entry: &HistoryEntry) -> Result<User> {
        let history: Vec<HistoryEntry> = user
            .history
            .iter()
            .filter(|it| !it.matches(entry))
            .cloned()
            .collect();
        self.set_history(&user.id, &history).await
    }

    fn songs(&self) -> SongsClient<'a> {
        SongsClient::new(self.http, self.base_url)
    }
}
