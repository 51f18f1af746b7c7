//! Core types for playback control

use serde::{Deserialize, Serialize};
use tunify_core::Track;

/// Coarse transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Queue is empty
    Empty,

    /// A track is selected but not playing
    Paused,

    /// Playing audio
    Playing,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume in [0, 1] (default: 1.0)
    pub volume: f32,

    /// Restart the current track on natural end (default: false)
    pub loop_enabled: bool,

    /// Random next-track selection (default: false)
    pub shuffle: bool,

    /// Seed for the shuffle picker; entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            loop_enabled: false,
            shuffle: false,
            shuffle_seed: None,
        }
    }
}

/// Observable player state handed to the view layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Transport state
    pub state: PlaybackState,
    /// Track under the cursor
    pub current_track: Option<Track>,
    /// Queue in playback order
    pub queue: Vec<Track>,
    /// Cursor into the queue
    pub cursor: Option<usize>,
    /// Whether audio is playing
    pub is_playing: bool,
    /// Whether a start request is awaiting resolution
    pub is_loading: bool,
    /// Position in seconds
    pub current_time: f64,
    /// Duration in seconds, once known
    pub duration: Option<f64>,
    /// Volume in [0, 1]
    pub volume: f32,
    /// Loop mode
    pub loop_enabled: bool,
    /// Shuffle mode
    pub shuffle: bool,
}
