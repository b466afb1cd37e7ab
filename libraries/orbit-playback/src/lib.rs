//! Orbit Playback - shared audio playback controller
//!
//! One logical media session used by every UI surface (bottom bar, full
//! screen "now playing" card, shuffle page). The crate provides:
//! - [`PlaybackEngine`]: contract for the single media primitive
//! - [`PlayerController`]: the state machine that owns the engine, the
//!   playlist and the published [`PlaybackState`]
//! - [`PlayerIntent`]: message form of the controller operations
//! - `web::HtmlAudioEngine` (feature `web`, wasm32): `<audio>` element engine
//!
//! # Architecture
//!
//! ```text
//! UI intent -> PlayerController -> PlaybackEngine -> media element
//!                    ^                                    |
//!                    +---- EngineEvent (tagged LoadId) ---+
//! ```
//!
//! Every `load` gets a fresh [`LoadId`]. Events carry the id of the load
//! that produced them and the controller drops anything older, so a late
//! `DurationKnown` for a track the user already skipped cannot leak into the
//! current one.
//!
//! # Example
//!
//! ```rust
//! use orbit_core::Track;
//! use orbit_playback::{
//!     channel, EngineEventKind, LoadId, PlaybackEngine, PlayerConfig, PlayerController,
//! };
//!
//! #[derive(Default)]
//! struct SilentEngine;
//!
//! impl PlaybackEngine for SilentEngine {
//!     fn load(&mut self, _load: LoadId, _url: &str) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//! }
//!
//! let (events, receiver) = channel();
//! let mut player = PlayerController::new(SilentEngine, receiver, PlayerConfig::default());
//!
//! let tracks = vec![
//!     Track::new("1", "https://cdn.example/1.mp3", "One", "Ada"),
//!     Track::new("2", "https://cdn.example/2.mp3", "Two", "Ada"),
//! ];
//! player.set_playlist(tracks, 1);
//! player.toggle_play_pause();
//!
//! events.emit(player.current_load(), EngineEventKind::DurationKnown(180.0));
//! player.process_engine_events();
//!
//! assert_eq!(player.state().duration, 180.0);
//! player.next_track();
//! assert_eq!(player.state().current_index, 0);
//! assert!(player.state().is_playing);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod engine;
pub mod error;
pub mod intent;
pub mod subscription;
pub mod types;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use controller::PlayerController;
pub use engine::{
    channel, play_rejection, EngineEvent, EngineEventKind, EngineEventReceiver, EngineEventSender,
    LoadId, PlaybackEngine,
};
pub use error::{PlayerError, Result};
pub use intent::PlayerIntent;
pub use subscription::SubscriptionId;
pub use types::{PlaybackState, PlayerConfig, Transport};
