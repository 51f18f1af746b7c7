/// CLI error types
use thiserror::Error;
use tunify_client::ClientError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Song {0} not found")]
    TrackNotFound(String),

    #[error("Playlist {0} not found")]
    PlaylistNotFound(String),

    #[error("No history entry at position {0}")]
    HistoryIndex(usize),
}
