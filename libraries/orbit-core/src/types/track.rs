//! Track domain type

use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A playable audio item
///
/// Tracks are immutable values. Identity is the `id` alone: media and cover
/// URLs may be re-signed by the backend without changing which track this is,
/// so use [`Track::is_same_track`] rather than `==` when asking "is this the
/// track that is playing?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable track identifier
    pub id: TrackId,

    /// Resolvable media locator
    pub audio_url: String,

    /// Cover image locator
    pub cover_url: Option<String>,

    /// Track title
    pub title: String,

    /// Artist (uploader display name)
    pub artist: String,
}

impl Track {
    /// Create a track without cover art
    pub fn new(
        id: impl Into<TrackId>,
        audio_url: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            audio_url: audio_url.into(),
            cover_url: None,
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Attach a cover image locator
    #[must_use]
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    /// Whether `other` is the same logical track (ids match)
    pub fn is_same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
