//! Liked-tracks store
//!
//! Each user's likes live under `"{prefix}_{user_id}"` as a JSON array of
//! track ids, oldest like first.

use crate::error::Result as StorageResult;
use crate::kv::{FileKeyValueStore, KeyValueStore};
use orbit_core::config::StorageSettings;
use orbit_core::{CoreError, LikedTracks, Result, TrackId, UserId};
use std::collections::HashSet;
use tracing::debug;

/// Default key prefix
pub const DEFAULT_KEY_PREFIX: &str = "likedAudios";

/// [`LikedTracks`] over a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct LikedTracksStore<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> LikedTracksStore<S> {
    /// Store likes in `store` under keys starting with `prefix`
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Storage key for `user`
    pub fn key_for(&self, user: &UserId) -> String {
        format!("{}_{}", self.prefix, user)
    }

    /// Liked ids for `user` in the order they were liked
    pub fn list(&self, user: &UserId) -> Result<Vec<TrackId>> {
        let key = self.checked_key(user)?;
        match self.store.get(&key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Underlying key/value store
    pub fn store(&self) -> &S {
        &self.store
    }

    fn checked_key(&self, user: &UserId) -> Result<String> {
        if user.as_str().trim().is_empty() {
            return Err(CoreError::NotSignedIn);
        }
        Ok(self.key_for(user))
    }
}

impl LikedTracksStore<FileKeyValueStore> {
    /// File-backed store configured from `settings`
    pub fn open(settings: &StorageSettings) -> StorageResult<Self> {
        let store = FileKeyValueStore::open(&settings.liked_dir)?;
        Ok(Self::new(store, settings.liked_key_prefix.clone()))
    }
}

impl<S: KeyValueStore> LikedTracks for LikedTracksStore<S> {
    fn get(&self, user: &UserId) -> Result<HashSet<TrackId>> {
        Ok(self.list(user)?.into_iter().collect())
    }

    fn toggle(&mut self, user: &UserId, track: &TrackId) -> Result<bool> {
        let key = self.checked_key(user)?;
        let mut ids = self.list(user)?;

        let liked = match ids.iter().position(|id| id == track) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(track.clone());
                true
            }
        };

        let raw = serde_json::to_string(&ids)?;
        self.store.set(&key, &raw)?;
        debug!(
            "User {} {} track {}",
            user,
            if liked { "liked" } else { "unliked" },
            track
        );
        Ok(liked)
    }
}
