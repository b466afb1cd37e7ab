//! Published playback state and selectors

use crate::error::PlayerError;
use orbit_core::config::PlayerSettings;
use orbit_core::{Playlist, Track, TrackId};
use serde::Serialize;

/// Snapshot of the shared playback session
///
/// Owned and mutated by the controller only. Adapters read it through
/// [`PlayerController::state`](crate::PlayerController::state) or a
/// subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackState {
    /// Track the session is positioned on
    pub current_track: Option<Track>,

    /// Tracks currently associated with playback
    pub playlist: Playlist,

    /// Index of `current_track` within `playlist`
    pub current_index: usize,

    /// Playing intent (not a confirmation that audio is audible)
    pub is_playing: bool,

    /// Play head in seconds
    pub position: f64,

    /// Media duration in seconds, 0 until known
    pub duration: f64,

    /// Engine reported a stall and no time update has arrived since
    pub is_buffering: bool,

    /// Why playback last stopped on its own, cleared by the next user action
    pub last_error: Option<PlayerError>,
}

/// Transport state derived from [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transport {
    /// No current track
    Empty,

    /// Track set, duration not yet known
    Loading,

    /// Track loaded, not playing
    Paused,

    /// Track loaded and playing
    Playing,
}

impl PlaybackState {
    /// Derived transport state
    ///
    /// A failed load reports `Paused` so controls show a retry affordance
    /// instead of a spinner.
    pub fn transport(&self) -> Transport {
        if self.current_track.is_none() {
            Transport::Empty
        } else if self.last_error.is_some() {
            Transport::Paused
        } else if self.duration <= 0.0 {
            Transport::Loading
        } else if self.is_playing {
            Transport::Playing
        } else {
            Transport::Paused
        }
    }

    /// Whether a track is current
    pub fn has_track(&self) -> bool {
        self.current_track.is_some()
    }

    /// Position as a fraction of duration in `[0, 1]` (0 while unknown)
    pub fn progress_ratio(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds left in the current track
    pub fn remaining(&self) -> f64 {
        (self.duration - self.position).max(0.0)
    }

    /// Whether next/previous would move to another entry
    pub fn can_skip_tracks(&self) -> bool {
        self.current_track.is_some() && self.playlist.len() > 1
    }

    /// Whether `id` is the current track
    pub fn is_current(&self, id: &TrackId) -> bool {
        self.current_track.as_ref().is_some_and(|t| &t.id == id)
    }
}

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    /// Seconds used by skip intents that carry no amount
    pub skip_interval_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::from(&PlayerSettings::default())
    }
}

impl From<&PlayerSettings> for PlayerConfig {
    fn from(settings: &PlayerSettings) -> Self {
        Self {
            skip_interval_secs: settings.skip_interval_secs,
        }
    }
}
