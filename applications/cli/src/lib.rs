//! Tunify CLI Library
//!
//! Account, catalog, likes, playlists and history commands on top of
//! `tunify-client`.
//!
//! This library exposes the command handlers for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod output;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::AppConfig;
pub use error::{CliError, Result};
