//! Playlist - the ordered sequence currently associated with playback
//!
//! A playlist has no identity of its own and may contain the same track more
//! than once; entries are addressed by position. Navigation helpers implement
//! the wrap-around boundary policy: stepping past the last entry returns to
//! the first and vice versa.

use crate::types::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Ordered sequence of tracks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    /// Playlist containing just `track`
    pub fn single(track: Track) -> Self {
        Self {
            tracks: vec![track],
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no entries
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All entries in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Position of the first entry with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Insert `track` as the first entry
    pub fn prepend(&mut self, track: Track) {
        self.tracks.insert(0, track);
    }

    /// Clamp `index` into `0..len`
    ///
    /// Returns `None` for an empty playlist.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(index.min(self.tracks.len() - 1))
        }
    }

    /// Index after `index`, wrapping from the last entry to the first
    ///
    /// Returns `None` when there is nowhere else to go (`len <= 1`) or
    /// `index` is out of range.
    pub fn wrapping_next(&self, index: usize) -> Option<usize> {
        let len = self.tracks.len();
        if len <= 1 || index >= len {
            return None;
        }
        Some((index + 1) % len)
    }

    /// Index before `index`, wrapping from the first entry to the last
    ///
    /// Same `None` cases as [`Playlist::wrapping_next`].
    pub fn wrapping_previous(&self, index: usize) -> Option<usize> {
        let len = self.tracks.len();
        if len <= 1 || index >= len {
            return None;
        }
        Some((index + len - 1) % len)
    }

    /// Next entry after `index` (wrapping) whose track satisfies `predicate`
    ///
    /// The entry at `index` itself is never returned, so a subset containing
    /// only the current entry yields `None`.
    pub fn next_matching<P>(&self, index: usize, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Track) -> bool,
    {
        let len = self.tracks.len();
        if index >= len {
            return None;
        }
        (1..len)
            .map(|step| (index + step) % len)
            .find(|&i| predicate(&self.tracks[i]))
    }

    /// Previous entry before `index` (wrapping) whose track satisfies `predicate`
    pub fn previous_matching<P>(&self, index: usize, mut predicate: P) -> Option<usize>
    where
        P: FnMut(&Track) -> bool,
    {
        let len = self.tracks.len();
        if index >= len {
            return None;
        }
        (1..len)
            .map(|step| (index + len - step) % len)
            .find(|&i| predicate(&self.tracks[i]))
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self {
            tracks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
