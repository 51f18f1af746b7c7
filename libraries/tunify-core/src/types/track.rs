/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// Playable song
///
/// Tracks come either from the data store's `songs` collection or from a
/// search result mapped into the same shape. They are never edited once
/// built; the builder-style `with_*` methods consume and return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Category tag (slug, or the search term the track was found with)
    #[serde(default)]
    pub category: String,

    /// Media URL handed to the output facility
    #[serde(default)]
    pub audio_url: String,

    /// Cover image URL
    #[serde(default)]
    pub cover_url: String,
}

impl Track {
    /// Create a track with no category or cover
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            category: String::new(),
            audio_url: audio_url.into(),
            cover_url: String::new(),
        }
    }

    /// Set the category tag
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the cover image URL
    #[must_use]
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Whether the track has a media URL to load
    pub fn is_playable(&self) -> bool {
        !self.audio_url.trim().is_empty()
    }

    /// Case-insensitive substring match against title or artist
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle) || self.artist.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_camel_case() {
        let track = Track::new("1", "So What", "Miles Davis", "https://a/1.m4a")
            .with_category("jazz")
            .with_cover("https://a/1.jpg");

        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["audioUrl"], "https://a/1.m4a");
        assert_eq!(json["coverUrl"], "https://a/1.jpg");
        assert_eq!(json["category"], "jazz");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn parses_store_record_with_missing_fields() {
        let track: Track =
            serde_json::from_str(r#"{"id": 3, "title": "Untitled", "audioUrl": ""}"#).unwrap();

        assert_eq!(track.id, TrackId::new("3"));
        assert!(track.artist.is_empty());
        assert!(!track.is_playable());
    }

    #[test]
    fn matches_term_checks_title_and_artist() {
        let track = Track::new("1", "Blue in Green", "Miles Davis", "u");

        assert!(track.matches_term("green"));
        assert!(track.matches_term("DAVIS"));
        assert!(track.matches_term("  "));
        assert!(!track.matches_term("coltrane"));
    }
}
