//! User intents
//!
//! Serializable form of the controller's public operations, for adapters
//! that forward UI actions as messages instead of calling methods directly.

use orbit_core::Track;
use serde::{Deserialize, Serialize};

/// A request issued by a UI surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerIntent {
    /// Play `track`, optionally adopting `playlist`
    PlayTrack {
        /// Track to play
        track: Track,
        /// Playlist to adopt
        #[serde(default)]
        playlist: Option<Vec<Track>>,
    },

    /// Pause when playing, play otherwise
    TogglePlayPause,

    /// Seek to an absolute position in seconds
    SeekTo {
        /// Target position
        seconds: f64,
    },

    /// Seek forward; `None` uses the configured skip interval
    SkipForward {
        /// Amount in seconds
        #[serde(default)]
        seconds: Option<f64>,
    },

    /// Seek backward; `None` uses the configured skip interval
    SkipBack {
        /// Amount in seconds
        #[serde(default)]
        seconds: Option<f64>,
    },

    /// Next playlist entry (wrapping)
    NextTrack,

    /// Previous playlist entry (wrapping)
    PreviousTrack,

    /// Replace the playlist and start at `start_index`
    SetPlaylist {
        /// New playlist
        tracks: Vec<Track>,
        /// Entry to start at (clamped)
        #[serde(default)]
        start_index: usize,
    },
}
