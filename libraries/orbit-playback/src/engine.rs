//! Playback engine contract
//!
//! An engine wraps exactly one media-playback primitive (an `<audio>` element
//! in the browser) and knows nothing about playlists. Commands go in through
//! [`PlaybackEngine`]; outcomes come back asynchronously as [`EngineEvent`]s
//! on the channel created by [`channel`].
//!
//! Every `load` carries a [`LoadId`] minted by the controller. The engine
//! stamps each event with the id of the load that produced it, which is how
//! the controller recognizes and drops events belonging to a superseded load.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::trace;

/// Generation number of one `load` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl LoadId {
    /// Id used before anything has been loaded
    pub const NONE: LoadId = LoadId(0);

    /// The id following this one
    #[must_use]
    pub fn next(self) -> LoadId {
        LoadId(self.0.wrapping_add(1))
    }

    /// Raw generation number
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Low-level engine events
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEventKind {
    /// Playback position in seconds
    TimeUpdate(f64),

    /// Media duration in seconds became known
    DurationKnown(f64),

    /// Playback of the loaded source completed (once per completion)
    Ended,

    /// The source failed to load or decode
    Error(String),

    /// A `play()` request was refused by the runtime
    PlayRejected,

    /// Playback is waiting for data
    Stalled,
}

/// Engine event stamped with the load that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    /// Load this event belongs to
    pub load: LoadId,

    /// What happened
    pub kind: EngineEventKind,
}

impl EngineEvent {
    /// Create a new event
    pub fn new(load: LoadId, kind: EngineEventKind) -> Self {
        Self { load, kind }
    }
}

/// Media playback primitive driven by the controller
///
/// All commands are fire-and-forget; results arrive as events. The
/// controller is the only caller.
pub trait PlaybackEngine {
    /// Point the media element at `url` and reset position/duration tracking
    ///
    /// Subsequent events must carry `load`. An empty or unusable `url` is
    /// reported as an [`EngineEventKind::Error`] event, never as a panic.
    fn load(&mut self, load: LoadId, url: &str);

    /// Request playback; refusal is reported as [`EngineEventKind::PlayRejected`]
    fn play(&mut self);

    /// Pause playback (synchronous)
    fn pause(&mut self);

    /// Move the play head, clamped to `[0, duration]`
    fn seek(&mut self, seconds: f64);

    /// Whether `play()` may be issued before the duration is known
    ///
    /// Engines returning `false` get their `play()` deferred until the
    /// controller sees [`EngineEventKind::DurationKnown`] for the load.
    fn can_play_before_loaded(&self) -> bool {
        true
    }
}

/// Event for a `play()` request that failed with the exception named `error_name`
///
/// `AbortError` means a later `pause()` or `load()` interrupted the request,
/// which is not a refusal and yields no event.
pub fn play_rejection(error_name: Option<&str>) -> Option<EngineEventKind> {
    match error_name {
        Some("AbortError") => None,
        _ => Some(EngineEventKind::PlayRejected),
    }
}

/// Create a connected event sender/receiver pair
pub fn channel() -> (EngineEventSender, EngineEventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EngineEventSender { tx }, EngineEventReceiver { rx })
}

/// Engine side of the event channel
#[derive(Debug, Clone)]
pub struct EngineEventSender {
    tx: Sender<EngineEvent>,
}

impl EngineEventSender {
    /// Emit an event for `load`
    ///
    /// Events emitted after the controller is gone are dropped.
    pub fn emit(&self, load: LoadId, kind: EngineEventKind) {
        trace!("Engine event {} {:?}", load, kind);
        let _ = self.tx.send(EngineEvent::new(load, kind));
    }
}

/// Controller side of the event channel
#[derive(Debug)]
pub struct EngineEventReceiver {
    rx: Receiver<EngineEvent>,
}

impl EngineEventReceiver {
    /// Next pending event, if any
    pub fn try_recv(&self) -> Option<EngineEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Engine that records commands, for controller unit tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub commands: Vec<EngineCommand>,
    pub defers_play: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCommand {
    Load(LoadId, String),
    Play,
    Pause,
    Seek(f64),
}

#[cfg(test)]
impl RecordingEngine {
    pub fn plays(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| **c == EngineCommand::Play)
            .count()
    }

    pub fn last_load(&self) -> Option<(LoadId, String)> {
        self.commands.iter().rev().find_map(|c| match c {
            EngineCommand::Load(id, url) => Some((*id, url.clone())),
            _ => None,
        })
    }
}

#[cfg(test)]
impl PlaybackEngine for RecordingEngine {
    fn load(&mut self, load: LoadId, url: &str) {
        self.commands.push(EngineCommand::Load(load, url.to_string()));
    }

    fn play(&mut self) {
        self.commands.push(EngineCommand::Play);
    }

    fn pause(&mut self) {
        self.commands.push(EngineCommand::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(EngineCommand::Seek(seconds));
    }

    fn can_play_before_loaded(&self) -> bool {
        !self.defers_play
    }
}
