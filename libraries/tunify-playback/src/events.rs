//! Playback Events
//!
//! Event-based communication for UI synchronization and for collaborators
//! such as the history recorder. Events are emitted at key points:
//! - State changes (play/pause/empty)
//! - Track changes (every load)
//! - Successful playback starts of a freshly loaded track
//! - Position, duration, volume and mode updates

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use tunify_core::{Track, TrackId};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track was loaded into the output
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previously loaded track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// A freshly loaded track started playing
    ///
    /// Not emitted when resuming a paused track.
    PlaybackStarted {
        /// The track now playing
        track: Track,
    },

    /// Position update
    PositionUpdate {
        /// Position in seconds
        position: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// Duration became known or was cleared
    DurationChanged {
        /// Duration in seconds
        duration: Option<f64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level in [0, 1]
        level: f32,
    },

    /// Loop mode toggled
    LoopChanged {
        /// New loop mode
        enabled: bool,
    },

    /// Shuffle mode toggled
    ShuffleChanged {
        /// New shuffle mode
        enabled: bool,
    },

    /// Queue replaced or cleared
    QueueChanged {
        /// New queue length
        length: usize,
        /// New cursor
        cursor: Option<usize>,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

/// Observer of playback events
///
/// Listeners are invoked synchronously on the controller's thread and must
/// not block; hand long work off to a task or channel.
pub trait PlaybackListener: Send + Sync {
    /// Called once per emitted event
    fn on_event(&self, event: &PlaybackEvent);
}

impl<F> PlaybackListener for F
where
    F: Fn(&PlaybackEvent) + Send + Sync,
{
    fn on_event(&self, event: &PlaybackEvent) {
        self(event);
    }
}
