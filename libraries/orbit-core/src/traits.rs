//! Collaborator contracts
//!
//! The managed backend and client-side storage are external to Orbit. These
//! traits describe the slice of them the playback features consume; concrete
//! implementations live with the application (or in `orbit-storage` for the
//! client-side pieces).
//!
//! The async contracts are `?Send`: the client runs on a single UI thread and
//! browser fetch futures are not `Send`.

use crate::error::Result;
use crate::types::{AudioStoryRow, TrackId, TrackQuery, UserId};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Source of track rows (the backend's audio stories table)
#[async_trait(?Send)]
pub trait TrackCatalog {
    /// Fetch rows matching `query`, ordered as `query.sort` requests
    async fn fetch_tracks(&self, query: &TrackQuery) -> Result<Vec<AudioStoryRow>>;
}

/// Source of profile display names
#[async_trait(?Send)]
pub trait ProfileDirectory {
    /// Resolve display names for `ids`
    ///
    /// Ids without a profile are simply absent from the returned map.
    async fn fetch_profile_names(&self, ids: &[UserId]) -> Result<HashMap<UserId, String>>;
}

/// Per-user set of liked track ids
///
/// Presentation-adjacent state: the playback controller never sees it.
pub trait LikedTracks {
    /// All liked track ids for `user`
    fn get(&self, user: &UserId) -> Result<HashSet<TrackId>>;

    /// Whether `user` likes `track`
    fn is_liked(&self, user: &UserId, track: &TrackId) -> Result<bool> {
        Ok(self.get(user)?.contains(track))
    }

    /// Flip the like state of `track` for `user`
    ///
    /// Returns the new state (`true` = liked).
    fn toggle(&mut self, user: &UserId, track: &TrackId) -> Result<bool>;
}
