//! Tunify Core
//!
//! Domain types shared by the playback controller, the data-store client and
//! the command-line application.
//!
//! Every type mirrors the JSON document the REST data store keeps for it, so
//! the same structs are used for reading, patching and displaying records.
//!
//! # Example
//!
//! ```rust
//! use tunify_core::{HistoryEntry, Playlist, Track, TrackId, UserId};
//!
//! let track = Track::new("42", "Blue in Green", "Miles Davis", "https://cdn.example/42.m4a")
//!     .with_category("jazz");
//! assert!(track.is_playable());
//!
//! let entry = HistoryEntry::now(&track);
//! assert_eq!(entry.track_id, TrackId::new("42"));
//!
//! let playlist = Playlist::draft(UserId::new("1"), "Late night").with_track(track.id.clone());
//! assert!(playlist.contains(&track.id));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{
    AuthUser, Category, CategoryId, HistoryEntry, NewAuthUser, NewPlaylist, NewUser, Playlist,
    PlaylistId, Track, TrackId, User, UserId,
};
