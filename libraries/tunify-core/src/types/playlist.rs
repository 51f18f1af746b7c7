/// Playlist domain types
use crate::types::{PlaylistId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// User-owned ordered list of track ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner
    pub user_id: UserId,

    /// Display name
    pub name: String,

    /// Track ids in playlist order
    #[serde(default)]
    pub song_ids: Vec<TrackId>,
}

impl Playlist {
    /// Unsaved playlist body for `user`
    pub fn draft(user_id: UserId, name: impl Into<String>) -> NewPlaylist {
        NewPlaylist {
            user_id,
            name: name.into(),
            song_ids: Vec::new(),
        }
    }

    /// Whether the playlist holds the track
    pub fn contains(&self, track: &TrackId) -> bool {
        self.song_ids.contains(track)
    }

    /// Track ids with `track` appended unless already present
    pub fn with_track(&self, track: &TrackId) -> Vec<TrackId> {
        let mut ids = self.song_ids.clone();
        if !ids.contains(track) {
            ids.push(track.clone());
        }
        ids
    }

    /// Track ids without `track`
    pub fn without_track(&self, track: &TrackId) -> Vec<TrackId> {
        self.song_ids
            .iter()
            .filter(|id| *id != track)
            .cloned()
            .collect()
    }

    /// Copy of the playlist under a new name
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Body used to create a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    /// Owner
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Initial tracks
    pub song_ids: Vec<TrackId>,
}

impl NewPlaylist {
    /// Add a track to the draft, skipping duplicates
    #[must_use]
    pub fn with_track(mut self, track: TrackId) -> Self {
        if !self.song_ids.contains(&track) {
            self.song_ids.push(track);
        }
        self
    }

    /// Whether the draft holds the track
    pub fn contains(&self, track: &TrackId) -> bool {
        self.song_ids.contains(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_playlist() -> Playlist {
        Playlist {
            id: PlaylistId::new("10"),
            user_id: UserId::new("1"),
            name: "Mix".to_string(),
            song_ids: vec![TrackId::new("a")],
        }
    }

    #[test]
    fn with_track_is_deduplicated() {
        let playlist = create_test_playlist();

        assert_eq!(playlist.with_track(&TrackId::new("a")).len(), 1);
        assert_eq!(
            playlist.with_track(&TrackId::new("b")),
            vec![TrackId::new("a"), TrackId::new("b")]
        );
    }

    #[test]
    fn without_track_and_renamed() {
        let playlist = create_test_playlist();

        assert!(playlist.without_track(&TrackId::new("a")).is_empty());
        let renamed = playlist.renamed("Focus");
        assert_eq!(renamed.name, "Focus");
        assert_eq!(renamed.id, playlist.id);
    }

    #[test]
    fn draft_serializes_owner_as_user_id() {
        let draft = Playlist::draft(UserId::new("1"), "New").with_track(TrackId::new("x"));
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["userId"], "1");
        assert_eq!(json["songIds"], serde_json::json!(["x"]));
    }

    #[test]
    fn parses_numeric_ids() {
        let playlist: Playlist =
            serde_json::from_str(r#"{"id": 4, "userId": 2, "name": "n", "songIds": [1, "b"]}"#)
                .unwrap();

        assert_eq!(playlist.user_id, UserId::new("2"));
        assert!(playlist.contains(&TrackId::new("1")));
    }
}
