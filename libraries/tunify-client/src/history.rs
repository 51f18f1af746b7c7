//! Play history recording.
//!
//! The recorder listens to playback events and hands every successful start
//! to a background worker. The worker applies entries one at a time so
//! concurrent starts never overwrite each other's history.

use crate::client::DataStoreClient;
use crate::error::Result;
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use tunify_core::{HistoryEntry, Track, User, UserId};
use tunify_playback::{PlaybackEvent, PlaybackListener};

#[cfg(test)]
use mockall::automock;

/// Persistence used by the history worker.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load a profile.
    async fn fetch_user(&self, id: &UserId) -> Result<User>;

    /// Append an entry to a profile's history, returning the updated profile.
    async fn append_history(&self, user: &User, entry: HistoryEntry) -> Result<User>;
}

#[async_trait]
impl HistoryStore for DataStoreClient {
    async fn fetch_user(&self, id: &UserId) -> Result<User> {
        self.users().get(id).await
    }

    async fn append_history(&self, user: &User, entry: HistoryEntry) -> Result<User> {
        self.users().append_history(user, entry).await
    }
}

#[derive(Debug)]
struct HistoryJob {
    user_id: UserId,
    entry: HistoryEntry,
}

/// Playback listener that appends started tracks to the user's history.
///
/// Recording never blocks the caller and failures are only logged.
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    session: Arc<SessionStore>,
    tx: mpsc::UnboundedSender<HistoryJob>,
}

impl HistoryRecorder {
    /// Start the background worker on the current Tokio runtime.
    ///
    /// The worker exits once every clone of the recorder is dropped.
    pub fn spawn<S>(store: S, session: Arc<SessionStore>) -> (Self, JoinHandle<()>)
    where
        S: HistoryStore + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(store, Arc::clone(&session), rx));
        (Self { session, tx }, worker)
    }

    /// Queue a history entry for `track` on behalf of the signed-in user.
    ///
    /// Returns `false` when nobody is signed in or the worker has stopped.
    pub fn record(&self, track: &Track) -> bool {
        let Some(user_id) = self.session.user_id() else {
            debug!(track_id = %track.id, "Anonymous playback, history not recorded");
            return false;
        };
        let job = HistoryJob {
            user_id,
            entry: HistoryEntry::now(track),
        };
        if self.tx.send(job).is_err() {
            warn!(track_id = %track.id, "History worker stopped, entry dropped");
            return false;
        }
        true
    }
}

impl PlaybackListener for HistoryRecorder {
    fn on_event(&self, event: &PlaybackEvent) {
        if let PlaybackEvent::PlaybackStarted { track } = event {
            self.record(track);
        }
    }
}

async fn run_worker<S: HistoryStore>(
    store: S,
    session: Arc<SessionStore>,
    mut rx: mpsc::UnboundedReceiver<HistoryJob>,
) {
    while let Some(job) = rx.recv().await {
        let user_id = job.user_id.clone();
        if let Err(e) = apply(&store, &session, job).await {
            warn!(user_id = %user_id, error = %e, "Failed to record history");
        }
    }
    debug!("History worker stopped");
}

async fn apply<S: HistoryStore>(store: &S, session: &SessionStore, job: HistoryJob) -> Result<()> {
    let user = match session.current() {
        Some(user) if user.id == job.user_id => user,
        _ => store.fetch_user(&job.user_id).await?,
    };

    let updated = store.append_history(&user, job.entry).await?;
    debug!(user_id = %job.user_id, entries = updated.history.len(), "Recorded history");

    session.update_if_current(updated);
    Ok(())
}
