//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index {index} out of bounds for queue of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Queue length
        len: usize,
    },

    /// Track has no media URL
    #[error("Track {0} has no playable media URL")]
    NotPlayable(String),

    /// Media output failed to accept a command
    #[error("Media output error: {0}")]
    Media(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
