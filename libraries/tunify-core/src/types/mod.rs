//! Domain types

mod category;
mod history;
mod ids;
mod playlist;
mod track;
mod user;

pub use category::Category;
pub use history::HistoryEntry;
pub use ids::{CategoryId, PlaylistId, TrackId, UserId};
pub use playlist::{NewPlaylist, Playlist};
pub use track::Track;
pub use user::{AuthUser, NewAuthUser, NewUser, User};
