//! Media output seam
//!
//! The host provides the actual decode/output primitive (a browser audio
//! element, a native player, a test double). The controller is its only
//! caller and receives its notifications through [`MediaEvent`].

use crate::error::Result;

/// Host-provided decode and output facility
///
/// Commands are fire-and-forget. Starting playback is asynchronous: the
/// facility answers a [`MediaOutput::start`] call later with
/// [`MediaEvent::Started`] or [`MediaEvent::StartFailed`] carrying the same
/// ticket.
pub trait MediaOutput: Send {
    /// Replace the current source with `url` and rewind to zero
    fn load(&mut self, url: &str) -> Result<()>;

    /// Begin or resume playback of the loaded source
    fn start(&mut self, ticket: u64);

    /// Pause, keeping the position
    fn pause(&mut self);

    /// Stop and unload the current source
    fn stop(&mut self);

    /// Move the playback position
    fn seek(&mut self, seconds: f64);

    /// Apply a volume level in [0, 1]
    fn set_volume(&mut self, level: f32);

    /// Restart the source automatically on natural end
    fn set_loop(&mut self, enabled: bool);
}

/// Notifications from the media output facility
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A start request succeeded
    Started {
        /// Ticket passed to [`MediaOutput::start`]
        ticket: u64,
    },

    /// A start request was rejected
    StartFailed {
        /// Ticket passed to [`MediaOutput::start`]
        ticket: u64,
        /// Reason given by the facility
        message: String,
    },

    /// Periodic position report
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// Source metadata is available
    MetadataLoaded {
        /// Duration in seconds (may be NaN or infinite for streams)
        duration: f64,
    },

    /// The source played to its end
    Ended,

    /// Decoding or network failure
    Error {
        /// Description of the failure
        message: String,
    },
}
