//! Error types for playback

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Playback failures
///
/// These never escape the public controller API as `Err` values. They are
/// recorded in [`PlaybackState::last_error`](crate::PlaybackState::last_error)
/// after the controller has reverted `is_playing` to false, so adapters can
/// explain why playback stopped while still showing the track.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlayerError {
    /// Media could not be loaded (bad or unreachable URL, decode failure)
    #[error("Failed to load media: {reason}")]
    Load {
        /// Reason reported by the engine
        reason: String,
    },

    /// The runtime refused to start or resume playback (autoplay policy)
    #[error("Playback was rejected by the runtime")]
    PlaybackRejected,

    /// The engine could not be constructed on this platform
    #[error("Playback engine unavailable: {0}")]
    EngineUnavailable(String),
}

/// Result type for engine construction
pub type Result<T> = std::result::Result<T, PlayerError>;
