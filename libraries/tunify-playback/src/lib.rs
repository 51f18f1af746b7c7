//! Tunify - Playback Control
//!
//! Platform-agnostic queue and transport control for Tunify.
//!
//! This crate provides:
//! - An ordered queue with a cursor (wraparound next/previous)
//! - Shuffle as a uniform random pick (repeats allowed)
//! - Loop mode, seek and a clamped linear volume
//! - Stale-start protection through per-request tickets
//! - Events for the view layer and for observers such as a history recorder
//!
//! # Architecture
//!
//! `tunify-playback` does no decoding and no I/O. The host implements
//! [`MediaOutput`] (an audio element, a native player) and feeds its
//! notifications back as [`MediaEvent`]s. Everything runs on the owner's
//! thread.
//!
//! # Example
//!
//! ```rust
//! use tunify_core::Track;
//! use tunify_playback::{MediaEvent, MediaOutput, PlaybackConfig, PlaybackController, Result};
//!
//! struct SilentOutput;
//!
//! impl MediaOutput for SilentOutput {
//!     fn load(&mut self, _url: &str) -> Result<()> { Ok(()) }
//!     fn start(&mut self, _ticket: u64) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn set_volume(&mut self, _level: f32) {}
//!     fn set_loop(&mut self, _enabled: bool) {}
//! }
//!
//! let mut player = PlaybackController::new(Box::new(SilentOutput), PlaybackConfig::default());
//! let tracks = vec![
//!     Track::new("1", "So What", "Miles Davis", "https://cdn.example/1.m4a"),
//!     Track::new("2", "Naima", "John Coltrane", "https://cdn.example/2.m4a"),
//! ];
//!
//! player.play_songs(tracks, 0).unwrap();
//!
//! // The output later reports that the start request succeeded
//! player.handle_media_event(MediaEvent::Started { ticket: 1 });
//! assert!(player.is_playing());
//!
//! player.next();
//! assert_eq!(player.cursor(), Some(1));
//! ```

mod controller;
mod error;
mod events;
mod output;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, PlaybackListener};
pub use output::{MediaEvent, MediaOutput};
pub use queue::Queue;
pub use shuffle::ShufflePicker;
pub use types::{PlaybackConfig, PlaybackState, PlayerSnapshot};
pub use volume::Volume;
