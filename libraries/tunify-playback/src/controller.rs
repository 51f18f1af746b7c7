//! Playback controller - core orchestration
//!
//! Owns the queue, the cursor and the transport state, and is the only
//! component that commands the media output. Output notifications are fed
//! back through [`PlaybackController::handle_media_event`].

use crate::{
    error::{PlaybackError, Result},
    events::{PlaybackEvent, PlaybackListener},
    output::{MediaEvent, MediaOutput},
    queue::Queue,
    shuffle::ShufflePicker,
    types::{PlaybackConfig, PlaybackState, PlayerSnapshot},
    volume::Volume,
};
use std::sync::Arc;
use tracing::{debug, warn};
use tunify_core::{Track, TrackId, UserId};

/// How an in-flight start request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartKind {
    /// The track was loaded for this start
    Load,
    /// The loaded track was resumed from pause
    Resume,
}

#[derive(Debug, Clone, Copy)]
struct PendingStart {
    ticket: u64,
    kind: StartKind,
}

/// Queue and transport controller
///
/// All methods run on the owner's thread. Starting playback is asynchronous:
/// every start request carries a ticket and only the resolution for the
/// latest request may change `is_playing`.
pub struct PlaybackController {
    output: Box<dyn MediaOutput>,

    queue: Queue,

    // Track whose source is currently in the output
    loaded: Option<Track>,
    last_loaded_id: Option<TrackId>,
    is_playing: bool,
    current_time: f64,
    duration: Option<f64>,

    volume: Volume,
    loop_enabled: bool,
    shuffle: bool,
    picker: ShufflePicker,

    generation: u64,
    pending: Option<PendingStart>,

    identity: Option<UserId>,

    listeners: Vec<Arc<dyn PlaybackListener>>,
    pending_events: Vec<PlaybackEvent>,
    reported_state: PlaybackState,
}

impl PlaybackController {
    /// Create a controller driving `output`
    pub fn new(output: Box<dyn MediaOutput>, config: PlaybackConfig) -> Self {
        let mut controller = Self {
            output,
            queue: Queue::new(),
            loaded: None,
            last_loaded_id: None,
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: Volume::new(config.volume),
            loop_enabled: config.loop_enabled,
            shuffle: config.shuffle,
            picker: ShufflePicker::new(config.shuffle_seed),
            generation: 0,
            pending: None,
            identity: None,
            listeners: Vec::new(),
            pending_events: Vec::new(),
            reported_state: PlaybackState::Empty,
        };
        controller.output.set_volume(controller.volume.level());
        controller.output.set_loop(controller.loop_enabled);
        controller
    }

    /// Register an observer for every subsequent event
    pub fn add_listener(&mut self, listener: Arc<dyn PlaybackListener>) {
        self.listeners.push(listener);
    }

    // ===== Playback Control =====

    /// Replace the queue with `tracks` and start playing at `start_index`
    ///
    /// Fails without touching any state when `tracks` is empty or
    /// `start_index` is out of range.
    pub fn play_songs(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        self.queue.replace(tracks, start_index)?;
        debug!(
            length = self.queue.len(),
            start = start_index,
            "Replacing playback queue"
        );
        self.halt();
        self.emit_queue_changed();
        self.load_and_start();
        Ok(())
    }

    /// Start or resume playback
    ///
    /// Resumes the loaded track; loads the current track first when the
    /// output has nothing loaded. No-op on an empty queue.
    pub fn play(&mut self) {
        if self.queue.is_empty() || self.is_playing || self.pending.is_some() {
            return;
        }

        if self.loaded.is_some() {
            let ticket = self.next_ticket();
            self.pending = Some(PendingStart {
                ticket,
                kind: StartKind::Resume,
            });
            self.output.start(ticket);
        } else {
            self.load_and_start();
        }
    }

    /// Pause playback
    ///
    /// Also cancels a start request that has not resolved yet.
    pub fn pause(&mut self) {
        if self.loaded.is_none() {
            return;
        }
        self.output.pause();
        self.pending = None;
        self.set_playing(false);
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self) {
        if self.is_playing || self.pending.is_some() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop playback
    ///
    /// Unloads the current source but keeps the queue and cursor. A later
    /// [`play`](Self::play) loads the track again.
    pub fn stop(&mut self) {
        if self.loaded.is_none() && !self.is_playing {
            return;
        }
        self.halt();
        self.set_duration(None);
    }

    /// Skip to next track
    ///
    /// With shuffle on, any index may come next, including the current one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let index = if self.shuffle {
            self.picker.pick(self.queue.len())
        } else {
            self.queue.next_index()
        };
        self.jump_to(index);
    }

    /// Go to previous track, wrapping to the end; ignores shuffle
    pub fn previous(&mut self) {
        let index = self.queue.previous_index();
        self.jump_to(index);
    }

    /// Jump to and play the track at `index`
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        self.queue.set_cursor(index)?;
        self.halt();
        self.emit_queue_changed();
        self.load_and_start();
        Ok(())
    }

    fn jump_to(&mut self, index: Option<usize>) {
        let Some(index) = index else {
            return;
        };
        if self.queue.set_cursor(index).is_err() {
            return;
        }
        self.halt();
        self.emit_queue_changed();
        self.load_and_start();
    }

    // ===== Seek =====

    /// Seek to `seconds` in the current track
    ///
    /// No-op while the duration is unknown. The target is clamped to
    /// `[0, duration]`.
    pub fn seek(&mut self, seconds: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        if self.loaded.is_none() || !seconds.is_finite() {
            return;
        }
        let position = seconds.clamp(0.0, duration);
        self.output.seek(position);
        self.current_time = position;
        self.emit(PlaybackEvent::PositionUpdate {
            position,
            duration: self.duration,
        });
    }

    // ===== Volume & Modes =====

    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&mut self, level: f32) {
        if self.volume.set_level(level) {
            self.output.set_volume(self.volume.level());
            self.emit(PlaybackEvent::VolumeChanged {
                level: self.volume.level(),
            });
        }
    }

    /// Enable or disable looping of the current track
    pub fn set_loop(&mut self, enabled: bool) {
        if self.loop_enabled == enabled {
            return;
        }
        self.loop_enabled = enabled;
        self.output.set_loop(enabled);
        self.emit(PlaybackEvent::LoopChanged { enabled });
    }

    /// Enable or disable random next-track selection
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle == enabled {
            return;
        }
        self.shuffle = enabled;
        self.emit(PlaybackEvent::ShuffleChanged { enabled });
    }

    // ===== Identity =====

    /// Report the current session identity
    ///
    /// Any change of user id, including to or from anonymous, resets the
    /// controller.
    pub fn set_identity(&mut self, identity: Option<UserId>) {
        if self.identity == identity {
            return;
        }
        debug!(
            from = ?self.identity.as_ref().map(UserId::as_str),
            to = ?identity.as_ref().map(UserId::as_str),
            "Session identity changed, resetting player"
        );
        self.identity = identity;
        self.reset();
    }

    /// Stop playback and clear the queue
    ///
    /// Volume, loop and shuffle settings are kept.
    pub fn reset(&mut self) {
        self.halt();
        self.last_loaded_id = None;
        self.set_duration(None);
        if !self.queue.is_empty() {
            self.queue.clear();
            self.emit_queue_changed();
        }
        self.sync_state();
    }

    // ===== Media Events =====

    /// Apply a notification from the media output
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Started { ticket } => self.on_started(ticket),
            MediaEvent::StartFailed { ticket, message } => self.on_start_failed(ticket, &message),
            MediaEvent::TimeUpdate { position } => {
                if self.loaded.is_some() && position.is_finite() {
                    self.current_time = position.max(0.0);
                    self.emit(PlaybackEvent::PositionUpdate {
                        position: self.current_time,
                        duration: self.duration,
                    });
                }
            }
            MediaEvent::MetadataLoaded { duration } => {
                let duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
                self.set_duration(duration);
            }
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::Error { message } => {
                warn!(error = %message, "Media output error");
                self.pending = None;
                self.set_playing(false);
                self.emit(PlaybackEvent::Error { message });
            }
        }
    }

    fn on_started(&mut self, ticket: u64) {
        let Some(pending) = self.take_pending(ticket) else {
            debug!(ticket, "Discarding stale start resolution");
            return;
        };
        self.set_playing(true);
        if pending.kind == StartKind::Load {
            if let Some(track) = self.loaded.clone() {
                self.emit(PlaybackEvent::PlaybackStarted { track });
            }
        }
    }

    fn on_start_failed(&mut self, ticket: u64, message: &str) {
        if self.take_pending(ticket).is_none() {
            debug!(ticket, "Discarding stale start failure");
            return;
        }
        warn!(error = %message, "Playback failed to start");
        self.set_playing(false);
        self.emit(PlaybackEvent::Error {
            message: message.to_string(),
        });
    }

    fn on_ended(&mut self) {
        if self.loaded.is_none() || self.loop_enabled {
            // The output restarts looped sources itself
            return;
        }
        self.current_time = 0.0;
        self.pending = None;
        self.set_playing(false);
        if self.queue.has_next() {
            self.next();
        }
    }

    fn take_pending(&mut self, ticket: u64) -> Option<PendingStart> {
        match self.pending {
            Some(pending) if pending.ticket == ticket => self.pending.take(),
            _ => None,
        }
    }

    // ===== State Queries =====

    /// Coarse transport state
    pub fn state(&self) -> PlaybackState {
        if self.queue.is_empty() {
            PlaybackState::Empty
        } else if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Track under the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Queue in playback order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Cursor into the queue
    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether a start request is awaiting resolution
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the output has the current track loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration in seconds, once known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Volume in [0, 1]
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Loop mode
    pub fn is_loop(&self) -> bool {
        self.loop_enabled
    }

    /// Shuffle mode
    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    /// Copy of the observable state
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state(),
            current_track: self.current_track().cloned(),
            queue: self.queue.tracks().to_vec(),
            cursor: self.queue.cursor(),
            is_playing: self.is_playing,
            is_loading: self.is_loading(),
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            loop_enabled: self.loop_enabled,
            shuffle: self.shuffle,
        }
    }

    // ===== Internal =====

    fn next_ticket(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Stop the output and invalidate any in-flight start
    fn halt(&mut self) {
        if self.loaded.take().is_some() {
            self.output.stop();
        }
        self.pending = None;
        self.current_time = 0.0;
        self.set_playing(false);
    }

    /// Load the track under the cursor and request a start
    fn load_and_start(&mut self) {
        let Some(track) = self.queue.current().cloned() else {
            return;
        };
        let ticket = self.next_ticket();
        if self.loaded.take().is_some() {
            self.output.stop();
        }
        self.current_time = 0.0;
        self.set_duration(None);

        if !track.is_playable() {
            warn!(track_id = %track.id, "Track has no media URL");
            self.set_playing(false);
            self.emit(PlaybackEvent::Error {
                message: PlaybackError::NotPlayable(track.id.to_string()).to_string(),
            });
            return;
        }

        if let Err(e) = self.output.load(&track.audio_url) {
            warn!(track_id = %track.id, error = %e, "Failed to load track");
            self.set_playing(false);
            self.emit(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return;
        }

        debug!(track_id = %track.id, ticket, "Loaded track");
        let previous_track_id = self.last_loaded_id.replace(track.id.clone());
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.loaded = Some(track);
        self.pending = Some(PendingStart {
            ticket,
            kind: StartKind::Load,
        });
        self.output.start(ticket);
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        self.sync_state();
    }

    fn set_duration(&mut self, duration: Option<f64>) {
        if self.duration != duration {
            self.duration = duration;
            self.emit(PlaybackEvent::DurationChanged { duration });
        }
    }

    // ===== Event System =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last call. Registered listeners
    /// have already seen them.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: PlaybackEvent) {
        for listener in &self.listeners {
            listener.on_event(&event);
        }
        self.pending_events.push(event);
    }

    /// Emit a state changed event if the coarse state moved
    fn sync_state(&mut self) {
        let state = self.state();
        if state != self.reported_state {
            self.reported_state = state;
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            cursor: self.queue.cursor(),
        });
        self.sync_state();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state())
            .field("cursor", &self.queue.cursor())
            .field("queue_len", &self.queue.len())
            .field("is_loading", &self.is_loading())
            .field("volume", &self.volume.level())
            .field("loop_enabled", &self.loop_enabled)
            .field("shuffle", &self.shuffle)
            .finish_non_exhaustive()
    }
}
