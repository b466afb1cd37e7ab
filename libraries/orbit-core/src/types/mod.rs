//! Domain types for Orbit

mod catalog;
mod ids;
mod playlist;
mod track;

pub use catalog::{AudioStoryRow, TrackQuery, TrackSort, ALL_CATEGORIES};
pub use ids::{TrackId, UserId};
pub use playlist::Playlist;
pub use track::Track;
