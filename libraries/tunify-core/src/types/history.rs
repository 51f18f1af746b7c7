/// Play history entry
use crate::types::{Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single playback start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry id, present only on entries that were given one by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Track that was played
    #[serde(rename = "songId")]
    pub track_id: TrackId,

    /// Track title at the time of play
    #[serde(default)]
    pub title: String,

    /// Artist at the time of play
    #[serde(default)]
    pub artist: String,

    /// When playback started, stored as epoch milliseconds
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub played_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Entry for `track` played at `played_at`
    pub fn new(track: &Track, played_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            track_id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            played_at,
        }
    }

    /// Entry for `track` played now
    pub fn now(track: &Track) -> Self {
        Self::new(track, Utc::now())
    }

    /// Whether `other` denotes the same entry.
    ///
    /// Entries carrying ids on both sides compare by id; otherwise the
    /// title and artist pair identifies the entry.
    pub fn matches(&self, other: &HistoryEntry) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.title == other.title && self.artist == other.artist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn track() -> Track {
        Track::new("9", "Naima", "John Coltrane", "https://a/9.m4a")
    }

    #[test]
    fn timestamp_is_epoch_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let entry = HistoryEntry::new(&track(), at);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["ts"], 1_700_000_000_123_i64);
        assert_eq!(json["songId"], "9");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn parses_stored_entry() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"songId": 9, "title": "Naima", "artist": "John Coltrane", "ts": 1700000000000}"#,
        )
        .unwrap();

        assert_eq!(entry.track_id, TrackId::new("9"));
        assert_eq!(entry.played_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn matches_by_id_when_both_have_one() {
        let mut a = HistoryEntry::now(&track());
        let mut b = a.clone();
        a.id = Some("x".into());
        b.id = Some("y".into());

        assert!(!a.matches(&b));
        b.id = Some("x".into());
        assert!(a.matches(&b));
    }

    #[test]
    fn matches_by_title_and_artist_otherwise() {
        let a = HistoryEntry::now(&track());
        let mut b = a.clone();
        b.id = Some("y".into());
        assert!(a.matches(&b));

        b.artist = "Someone else".into();
        assert!(!a.matches(&b));
    }
}
