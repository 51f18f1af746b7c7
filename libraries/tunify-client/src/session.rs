//! Signed-in user session.

use crate::client::DataStoreClient;
use crate::error::{ClientError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tunify_core::{User, UserId};
use tunify_playback::PlaybackController;

/// Holds the signed-in user and publishes identity changes.
///
/// Two channels are kept: one carrying the whole profile, notified on every
/// update, and one carrying only the user id, notified only when the id
/// changes (sign-in, sign-out, switching accounts).
///
/// Bound playback controllers are reset inside the identity change itself,
/// before the new id is published, so no playback from the previous account
/// can be observed under the next one.
#[derive(Debug)]
pub struct SessionStore {
    user: watch::Sender<Option<User>>,
    identity: watch::Sender<Option<UserId>>,
    players: Mutex<Vec<Weak<Mutex<PlaybackController>>>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Create an anonymous, in-memory session.
    pub fn new() -> Self {
        Self::from_user(None, None)
    }

    /// Create a session persisted to `path`.
    ///
    /// A session saved by an earlier run is restored.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let user = load(&path)?;
        if let Some(user) = &user {
            debug!(path = %path.display(), username = %user.username, "Restored session");
        }
        Ok(Self::from_user(user, Some(path)))
    }

    fn from_user(user: Option<User>, path: Option<PathBuf>) -> Self {
        let identity = user.as_ref().map(|u| u.id.clone());
        Self {
            user: watch::channel(user).0,
            identity: watch::channel(identity).0,
            players: Mutex::new(Vec::new()),
            path,
        }
    }

    /// Current profile, if signed in.
    pub fn current(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Current user id, if signed in.
    pub fn user_id(&self) -> Option<UserId> {
        self.identity.borrow().clone()
    }

    /// Current profile, or `NotLoggedIn`.
    pub fn require(&self) -> Result<User> {
        self.current().ok_or(ClientError::NotLoggedIn)
    }

    /// Subscribe to user id changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.identity.subscribe()
    }

    /// Keep a playback controller in step with the signed-in user.
    ///
    /// The controller is told the current identity right away and is reset
    /// on every later id change, including a sign-out followed by the same
    /// user signing back in. Only a weak reference is held.
    pub fn bind_controller(&self, controller: &Arc<Mutex<PlaybackController>>) {
        let mut players = self.players.lock().unwrap_or_else(PoisonError::into_inner);
        apply_identity(controller, self.user_id());
        players.push(Arc::downgrade(controller));
    }

    /// Sign in through the data store and remember the profile.
    pub async fn login(
        &self,
        client: &DataStoreClient,
        username: &str,
        password: &str,
    ) -> Result<User> {
        let user = client.auth().login(username, password).await?;
        self.set(Some(user.clone()));
        Ok(user)
    }

    /// Forget the signed-in user.
    pub fn logout(&self) {
        if let Some(user) = self.current() {
            info!(username = %user.username, "Logged out");
        }
        self.set(None);
    }

    /// Replace the profile, typically with one returned by a PATCH.
    pub fn update_user(&self, user: User) {
        self.set(Some(user));
    }

    /// Replace the profile only if it belongs to the signed-in user.
    ///
    /// Returns whether the profile was applied.
    pub fn update_if_current(&self, user: User) -> bool {
        if self.user_id().as_ref() != Some(&user.id) {
            return false;
        }
        self.set(Some(user));
        true
    }

    /// Re-read the signed-in profile from the data store.
    pub async fn refresh(&self, client: &DataStoreClient) -> Result<Option<User>> {
        let Some(id) = self.user_id() else {
            return Ok(None);
        };
        let user = client.users().get(&id).await?;
        self.update_if_current(user.clone());
        Ok(Some(user))
    }

    fn set(&self, user: Option<User>) {
        let id = user.as_ref().map(|u| u.id.clone());
        self.persist(user.as_ref());

        // Held across the reset so identity transitions apply one at a time
        let mut players = self.players.lock().unwrap_or_else(PoisonError::into_inner);
        let changed = *self.identity.borrow() != id;
        if changed {
            players.retain(|player| match player.upgrade() {
                Some(player) => {
                    apply_identity(&player, id.clone());
                    true
                }
                None => false,
            });
            self.identity.send_replace(id);
        }
        self.user.send_replace(user);
    }

    fn persist(&self, user: Option<&User>) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = save(path, user) {
            warn!(path = %path.display(), error = %e, "Failed to persist session");
        }
    }
}

fn apply_identity(player: &Mutex<PlaybackController>, id: Option<UserId>) {
    match player.lock() {
        Ok(mut player) => player.set_identity(id),
        Err(_) => warn!("Playback controller lock poisoned, identity not applied"),
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn load(path: &Path) -> Result<Option<User>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn save(path: &Path, user: Option<&User>) -> Result<()> {
    match user {
        Some(user) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, serde_json::to_vec_pretty(user)?)?;
            Ok(())
        }
        None => match std::fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_user(id: &str) -> User {
        User {
            id: UserId::new(id),
            username: format!("user{id}"),
            liked_song_ids: vec![],
            playlists: vec![],
            history: vec![],
        }
    }

    #[test]
    fn starts_anonymous() {
        let session = SessionStore::new();
        assert!(session.current().is_none());
        assert!(matches!(session.require(), Err(ClientError::NotLoggedIn)));
    }

    #[test]
    fn identity_notifies_only_on_id_change() {
        let session = SessionStore::new();
        let mut identity = session.subscribe();

        session.update_user(create_test_user("1"));
        assert!(identity.has_changed().unwrap());
        identity.mark_unchanged();

        let mut updated = create_test_user("1");
        updated.username = "renamed".into();
        session.update_user(updated);
        assert!(!identity.has_changed().unwrap());
        assert_eq!(session.current().unwrap().username, "renamed");

        session.update_user(create_test_user("2"));
        assert!(identity.has_changed().unwrap());
        assert_eq!(*identity.borrow_and_update(), Some(UserId::new("2")));

        session.logout();
        assert!(identity.has_changed().unwrap());
        assert_eq!(*identity.borrow(), None);
    }

    #[derive(Clone, Default)]
    struct NullOutput {
        starts: Arc<Mutex<Vec<u64>>>,
    }

    impl tunify_playback::MediaOutput for NullOutput {
        fn load(&mut self, _url: &str) -> tunify_playback::Result<()> {
            Ok(())
        }
        fn start(&mut self, ticket: u64) {
            self.starts.lock().unwrap().push(ticket);
        }
        fn pause(&mut self) {}
        fn stop(&mut self) {}
        fn seek(&mut self, _seconds: f64) {}
        fn set_volume(&mut self, _level: f32) {}
        fn set_loop(&mut self, _enabled: bool) {}
    }

    fn create_player(output: NullOutput) -> Arc<Mutex<PlaybackController>> {
        Arc::new(Mutex::new(PlaybackController::new(
            Box::new(output),
            tunify_playback::PlaybackConfig::default(),
        )))
    }

    fn create_test_track(id: &str) -> tunify_core::Track {
        tunify_core::Track::new(id, "Song", "Band", format!("https://cdn/{id}.m4a"))
    }

    #[test]
    fn bound_controller_resets_on_identity_change() {
        let session = SessionStore::new();
        session.update_user(create_test_user("1"));

        let player = create_player(NullOutput::default());
        session.bind_controller(&player);
        player
            .lock()
            .unwrap()
            .play_songs(vec![create_test_track("a")], 0)
            .unwrap();

        // Profile updates for the same user keep the queue
        session.update_user(create_test_user("1"));
        assert_eq!(player.lock().unwrap().queue().len(), 1);

        session.update_user(create_test_user("2"));
        assert!(player.lock().unwrap().queue().is_empty());
    }

    #[test]
    fn sign_out_and_back_in_resets_controller() {
        let session = SessionStore::new();
        session.update_user(create_test_user("1"));

        let player = create_player(NullOutput::default());
        session.bind_controller(&player);
        player
            .lock()
            .unwrap()
            .play_songs(vec![create_test_track("a")], 0)
            .unwrap();

        session.logout();
        assert!(player.lock().unwrap().queue().is_empty());

        player
            .lock()
            .unwrap()
            .play_songs(vec![create_test_track("b")], 0)
            .unwrap();
        session.update_user(create_test_user("1"));

        let player = player.lock().unwrap();
        assert!(player.queue().is_empty());
        assert!(!player.is_playing());
    }

    #[tokio::test]
    async fn start_after_account_switch_is_not_recorded() {
        use crate::history::{HistoryRecorder, MockHistoryStore};

        let session = Arc::new(SessionStore::new());
        session.update_user(create_test_user("1"));

        let mut store = MockHistoryStore::new();
        store.expect_fetch_user().never();
        store.expect_append_history().never();
        let (recorder, worker) = HistoryRecorder::spawn(store, Arc::clone(&session));

        let output = NullOutput::default();
        let starts = Arc::clone(&output.starts);
        let player = create_player(output);
        player.lock().unwrap().add_listener(Arc::new(recorder));
        session.bind_controller(&player);

        player
            .lock()
            .unwrap()
            .play_songs(vec![create_test_track("a")], 0)
            .unwrap();
        let ticket = *starts.lock().unwrap().last().unwrap();

        session.update_user(create_test_user("2"));
        player
            .lock()
            .unwrap()
            .handle_media_event(tunify_playback::MediaEvent::Started { ticket });
        assert!(!player.lock().unwrap().is_playing());

        // Dropping the controller drops the last recorder and stops the worker
        drop(player);
        worker.await.unwrap();
        assert!(session.current().unwrap().history.is_empty());
    }

    #[test]
    fn dropped_controller_is_released() {
        let session = SessionStore::new();
        let player = create_player(NullOutput::default());
        session.bind_controller(&player);
        drop(player);

        session.update_user(create_test_user("1"));
        assert!(session.players.lock().unwrap().is_empty());
    }

    #[test]
    fn update_if_current_ignores_other_users() {
        let session = SessionStore::new();
        session.update_user(create_test_user("1"));

        assert!(!session.update_if_current(create_test_user("2")));
        assert_eq!(session.user_id(), Some(UserId::new("1")));
        assert!(session.update_if_current(create_test_user("1")));
    }

    #[test]
    fn persisted_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let session = SessionStore::with_persistence(&path).unwrap();
        session.update_user(create_test_user("7"));
        drop(session);

        let restored = SessionStore::with_persistence(&path).unwrap();
        assert_eq!(restored.user_id(), Some(UserId::new("7")));
    }

    #[test]
    fn logout_removes_session_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionStore::with_persistence(&path).unwrap();
        session.update_user(create_test_user("7"));
        assert!(path.exists());

        session.logout();
        assert!(!path.exists());
        assert!(SessionStore::with_persistence(&path)
            .unwrap()
            .current()
            .is_none());
    }

    #[test]
    fn corrupt_session_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        assert!(matches!(
            SessionStore::with_persistence(&path),
            Err(ClientError::Serialization(_))
        ));
    }
}
