//! Orbit Core
//!
//! Platform-agnostic domain types, collaborator contracts and configuration
//! shared by the Orbit playback libraries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackId`, `UserId`
//! - **Collaborator Contracts**: `TrackCatalog`, `ProfileDirectory`, `LikedTracks`
//! - **Feed Assembly**: turning catalog rows into playable tracks
//! - **Configuration**: `ClientConfig` loaded from file and environment
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! The managed backend (auth, follows, chat, uploads) is not part of this
//! crate; it is reached only through the traits in [`traits`].
//!
//! # Example
//!
//! ```rust
//! use orbit_core::types::{Playlist, Track};
//!
//! let a = Track::new("1", "https://cdn.example/a.mp3", "Morning", "Ada");
//! let b = Track::new("2", "https://cdn.example/b.mp3", "Evening", "Ada");
//! let playlist = Playlist::from(vec![a.clone(), b]);
//!
//! assert_eq!(playlist.position_of(&a.id), Some(0));
//! assert_eq!(playlist.wrapping_next(1), Some(0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod feed;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{CoreError, Result};
pub use traits::{LikedTracks, ProfileDirectory, TrackCatalog};
pub use types::{AudioStoryRow, Playlist, Track, TrackId, TrackQuery, TrackSort, UserId};
