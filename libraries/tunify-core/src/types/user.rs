/// User domain types
use crate::types::{HistoryEntry, PlaylistId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Profile record stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Liked track ids, without duplicates
    #[serde(default)]
    pub liked_song_ids: Vec<TrackId>,

    /// Playlists owned by the user (stored separately)
    #[serde(default)]
    pub playlists: Vec<PlaylistId>,

    /// Play history, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl User {
    /// Whether the track is in the liked list
    pub fn is_liked(&self, track: &TrackId) -> bool {
        self.liked_song_ids.contains(track)
    }

    /// Liked list with the track appended if it was not there yet
    pub fn with_liked(&self, track: &TrackId) -> Vec<TrackId> {
        let mut liked = self.liked_song_ids.clone();
        if !liked.contains(track) {
            liked.push(track.clone());
        }
        liked
    }

    /// Liked list with every occurrence of the track removed
    pub fn without_liked(&self, track: &TrackId) -> Vec<TrackId> {
        self.liked_song_ids
            .iter()
            .filter(|id| *id != track)
            .cloned()
            .collect()
    }

    /// Most recent plays first
    pub fn recent_history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev()
    }
}

/// Body used to create a profile record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Initially empty
    pub liked_song_ids: Vec<TrackId>,
    /// Initially empty
    pub playlists: Vec<PlaylistId>,
    /// Initially empty
    pub history: Vec<HistoryEntry>,
}

impl NewUser {
    /// Empty profile for a username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            liked_song_ids: Vec::new(),
            playlists: Vec::new(),
            history: Vec::new(),
        }
    }
}

/// Credentials record stored in the `authUsers` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Record identifier
    pub id: UserId,
    /// Login name
    pub username: String,
    /// Password as stored by the data store
    pub password: String,
}

/// Body used to create a credentials record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAuthUser {
    /// Login name
    pub username: String,
    /// Password
    pub password: String,
}
