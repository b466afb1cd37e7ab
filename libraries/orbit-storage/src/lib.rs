//! Orbit Storage - client-side persistence
//!
//! Small, presentation-adjacent state that lives on the client rather than
//! in the managed backend. The playback controller never sees any of it.
//!
//! - [`KeyValueStore`]: string key/value collaborator (`localStorage` shape)
//!   with in-memory and directory-backed implementations
//! - [`LikedTracksStore`]: per-user liked track ids implementing
//!   [`orbit_core::LikedTracks`]

#![forbid(unsafe_code)]

pub mod error;
pub mod kv;
pub mod liked;

pub use error::{Result, StorageError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use liked::{LikedTracksStore, DEFAULT_KEY_PREFIX};
