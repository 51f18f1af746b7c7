//! Plain-text rendering for command output.

use tunify_core::{Category, HistoryEntry, Playlist, Track, User};

pub fn track_line(track: &Track) -> String {
    if track.category.is_empty() {
        format!("{:<12} {} - {}", track.id.as_str(), track.title, track.artist)
    } else {
        format!(
            "{:<12} {} - {} [{}]",
            track.id.as_str(),
            track.title,
            track.artist,
            track.category
        )
    }
}

pub fn track_list(tracks: &[Track], empty: &str) -> String {
    if tracks.is_empty() {
        return empty.to_string();
    }
    tracks.iter().map(track_line).collect::<Vec<_>>().join("\n")
}

pub fn category_line(category: &Category) -> String {
    format!("{:<16} {}", category.slug, category.label())
}

pub fn playlist_line(playlist: &Playlist) -> String {
    let count = playlist.song_ids.len();
    let noun = if count == 1 { "song" } else { "songs" };
    format!("{:<12} {} ({count} {noun})", playlist.id.as_str(), playlist.name)
}

/// Numbered history, positions match `history --remove`.
pub fn history_list(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No listening history yet.".to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{:>3}. {} - {}  {}",
                i + 1,
                e.title,
                e.artist,
                e.played_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_summary(user: &User) -> String {
    format!(
        "{} (id {})\n  liked songs: {}\n  history entries: {}",
        user.username,
        user.id,
        user.liked_song_ids.len(),
        user.history.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunify_core::{PlaylistId, UserId};

    #[test]
    fn track_line_shows_category_when_present() {
        let track = Track::new("1", "Yellow", "Coldplay", "https://a/1.m4a");
        assert!(!track_line(&track).contains('['));
        assert!(track_line(&track.with_category("rock")).ends_with("[rock]"));
    }

    #[test]
    fn empty_lists_use_placeholder() {
        assert_eq!(track_list(&[], "Nothing here."), "Nothing here.");
        assert_eq!(history_list(&[]), "No listening history yet.");
    }

    #[test]
    fn playlist_line_pluralizes() {
        let playlist = Playlist {
            id: PlaylistId::new("p1"),
            user_id: UserId::new("1"),
            name: "Mix".into(),
            song_ids: vec!["1".into()],
        };
        assert!(playlist_line(&playlist).ends_with("(1 song)"));
    }

    #[test]
    fn history_is_numbered_from_one() {
        let track = Track::new("1", "Yellow", "Coldplay", "https://a/1.m4a");
        let entries = vec![HistoryEntry::now(&track), HistoryEntry::now(&track)];
        let rendered = history_list(&entries);
        assert!(rendered.lines().next().unwrap().trim_start().starts_with("1. Yellow"));
        assert_eq!(rendered.lines().count(), 2);
    }
}
