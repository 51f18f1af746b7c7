//! Tunify Client
//!
//! Network side of the Tunify player: the REST data store, the track search
//! API, the signed-in session and play history recording.
//!
//! # Features
//!
//! - **Data store**: credentials, profiles, songs, playlists and categories
//! - **Search**: iTunes-style track search with a stored-catalog fallback
//! - **Session**: signed-in user with change notifications and persistence
//! - **History**: background recording of started tracks
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tunify_client::{ClientConfig, DataStoreClient, HistoryRecorder, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DataStoreClient::new(ClientConfig::default())?;
//!     let session = Arc::new(SessionStore::new());
//!
//!     let user = session.login(&client, "ana", "secret").await?;
//!     println!("Logged in as {}", user.username);
//!
//!     // Register the recorder as a playback listener
//!     let (recorder, _worker) = HistoryRecorder::spawn(client.clone(), Arc::clone(&session));
//!     controller.add_listener(Arc::new(recorder));
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod catalog;
mod categories;
mod client;
mod error;
mod history;
mod playlists;
mod search;
mod session;
mod songs;
mod types;
mod users;

// Re-export main types
pub use catalog::{Catalog, SearchSource};
pub use client::DataStoreClient;
pub use error::{ClientError, Result};
pub use history::{HistoryRecorder, HistoryStore};
pub use search::SearchClient;
pub use session::SessionStore;
pub use types::{ClientConfig, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_URL, DEFAULT_STORE_URL};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use categories::CategoriesClient;
pub use playlists::PlaylistsClient;
pub use songs::SongsClient;
pub use users::UsersClient;
