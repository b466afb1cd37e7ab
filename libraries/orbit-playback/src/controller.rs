//! Player controller - the shared playback state machine
//!
//! One controller exists per session. It owns the engine, the published
//! [`PlaybackState`] and the bookkeeping for the load in flight; every
//! mutation happens synchronously inside a public operation or inside
//! [`PlayerController::handle_engine_event`].

use crate::{
    engine::{EngineEvent, EngineEventKind, EngineEventReceiver, LoadId, PlaybackEngine},
    error::PlayerError,
    intent::PlayerIntent,
    subscription::{SubscriptionId, Subscribers},
    types::{PlaybackState, PlayerConfig},
};
use orbit_core::{Playlist, Track};
use tracing::{debug, info, warn};

/// Shared playback controller
///
/// Transport operations are total: called without a current track they
/// leave the state untouched. Media failures never surface as `Err`; they
/// stop playback and are recorded in [`PlaybackState::last_error`].
#[derive(Debug)]
pub struct PlayerController<E: PlaybackEngine> {
    engine: E,
    events: EngineEventReceiver,
    config: PlayerConfig,
    state: PlaybackState,

    /// Load the engine is currently working on
    load: LoadId,

    /// `play()` already sent for `load`
    play_issued: bool,

    /// Duration known for `load`
    loaded: bool,

    subscribers: Subscribers,
}

impl<E: PlaybackEngine> PlayerController<E> {
    /// Create a controller driving `engine`
    ///
    /// `events` must be the receiving half of the channel the engine emits on.
    pub fn new(engine: E, events: EngineEventReceiver, config: PlayerConfig) -> Self {
        Self {
            engine,
            events,
            config,
            state: PlaybackState::default(),
            load: LoadId::NONE,
            play_issued: false,
            loaded: false,
            subscribers: Subscribers::default(),
        }
    }

    // ===== Accessors =====

    /// Current published state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// The engine being driven
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Controller configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Id of the most recent load
    pub fn current_load(&self) -> LoadId {
        self.load
    }

    // ===== Subscriptions =====

    /// Register `callback`, called after every operation or event that
    /// changed the state
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState) + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    /// Number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Apply a UI intent
    pub fn dispatch(&mut self, intent: PlayerIntent) {
        debug!("Dispatching intent {:?}", intent);
        match intent {
            PlayerIntent::PlayTrack { track, playlist } => self.play_track(track, playlist),
            PlayerIntent::TogglePlayPause => self.toggle_play_pause(),
            PlayerIntent::SeekTo { seconds } => self.seek_to(seconds),
            PlayerIntent::SkipForward { seconds } => {
                self.skip_forward(seconds.unwrap_or(self.config.skip_interval_secs));
            }
            PlayerIntent::SkipBack { seconds } => {
                self.skip_back(seconds.unwrap_or(self.config.skip_interval_secs));
            }
            PlayerIntent::NextTrack => self.next_track(),
            PlayerIntent::PreviousTrack => self.previous_track(),
            PlayerIntent::SetPlaylist {
                tracks,
                start_index,
            } => self.set_playlist(tracks, start_index),
        }
    }

    // ===== Track Selection =====

    /// Play `track`, optionally adopting `playlist`
    ///
    /// Without a playlist (or with an empty one) the playlist becomes
    /// `[track]`. A track missing from `playlist` is placed at its front.
    /// Playing intent carries over from the previous track.
    pub fn play_track(&mut self, track: Track, playlist: Option<Vec<Track>>) {
        self.transact(|this| {
            let (playlist, index) = match playlist.filter(|tracks| !tracks.is_empty()) {
                Some(tracks) => {
                    let mut playlist = Playlist::from(tracks);
                    let index = match playlist.position_of(&track.id) {
                        Some(index) => index,
                        None => {
                            debug!("Track {} not in given playlist, prepending", track.id);
                            playlist.prepend(track.clone());
                            0
                        }
                    };
                    (playlist, index)
                }
                None => (Playlist::single(track.clone()), 0),
            };

            let keep_playing = this.state.is_playing;
            this.state.playlist = playlist;
            this.switch_to(index, track, keep_playing);
        });
    }

    /// Replace the playlist and start at `start_index` (clamped)
    ///
    /// An empty list clears the session: the engine is paused and the load
    /// in flight is abandoned.
    pub fn set_playlist(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.transact(|this| {
            let playlist = Playlist::from(tracks);
            let Some(index) = playlist.clamp_index(start_index) else {
                this.clear();
                return;
            };
            let Some(track) = playlist.get(index).cloned() else {
                return;
            };

            let keep_playing = this.state.is_playing;
            this.state.playlist = playlist;
            this.switch_to(index, track, keep_playing);
        });
    }

    /// Move to the next entry, wrapping to the first
    pub fn next_track(&mut self) {
        let target = self
            .current_index()
            .and_then(|index| self.state.playlist.wrapping_next(index));
        self.move_to(target);
    }

    /// Move to the previous entry, wrapping to the last
    pub fn previous_track(&mut self) {
        let target = self
            .current_index()
            .and_then(|index| self.state.playlist.wrapping_previous(index));
        self.move_to(target);
    }

    /// Move to the next entry (wrapping) whose track satisfies `predicate`
    ///
    /// No-op when no other entry matches.
    pub fn next_in_subset<P>(&mut self, predicate: P)
    where
        P: FnMut(&Track) -> bool,
    {
        let target = self
            .current_index()
            .and_then(|index| self.state.playlist.next_matching(index, predicate));
        self.move_to(target);
    }

    /// Move to the previous entry (wrapping) whose track satisfies `predicate`
    pub fn previous_in_subset<P>(&mut self, predicate: P)
    where
        P: FnMut(&Track) -> bool,
    {
        let target = self
            .current_index()
            .and_then(|index| self.state.playlist.previous_matching(index, predicate));
        self.move_to(target);
    }

    // ===== Transport =====

    /// Pause when playing, play otherwise
    ///
    /// After a load error this retries the load. A single track that already
    /// ended restarts from the beginning.
    pub fn toggle_play_pause(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }

        self.transact(|this| {
            if this.state.is_playing {
                debug!("Pausing");
                this.state.is_playing = false;
                this.engine.pause();
                return;
            }

            if this.load_failed() {
                this.retry_load();
                return;
            }

            this.rewind_if_finished();
            this.state.last_error = None;
            this.state.is_playing = true;
            this.request_play();
        });
    }

    /// Seek to `seconds`, clamped to `[0, duration]`
    ///
    /// While the duration is unknown the only valid position is 0.
    pub fn seek_to(&mut self, seconds: f64) {
        if self.state.current_track.is_none() {
            return;
        }
        if seconds.is_nan() {
            debug!("Ignoring NaN seek");
            return;
        }

        let upper = self.state.duration.max(0.0);
        let target = seconds.clamp(0.0, upper);

        self.transact(|this| {
            this.engine.seek(target);
            this.state.position = target;
        });
    }

    /// Seek `seconds` forward from the current position
    pub fn skip_forward(&mut self, seconds: f64) {
        self.seek_to(self.state.position + seconds);
    }

    /// Seek `seconds` back from the current position
    pub fn skip_back(&mut self, seconds: f64) {
        self.seek_to(self.state.position - seconds);
    }

    // ===== Engine Events =====

    /// Drain and apply all pending engine events in emission order
    ///
    /// Returns the number of events drained (stale ones included).
    pub fn process_engine_events(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.events.try_recv() {
            self.handle_engine_event(event);
            count += 1;
        }
        count
    }

    /// Apply one engine event
    ///
    /// Events tagged with a superseded load are discarded.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        if event.load != self.load {
            debug!(
                "Discarding stale {:?} from {} (current {})",
                event.kind, event.load, self.load
            );
            return;
        }
        if self.state.current_track.is_none() {
            return;
        }
        if self.load_failed() {
            debug!("Ignoring {:?} from failed {}", event.kind, event.load);
            return;
        }

        self.transact(|this| match event.kind {
            EngineEventKind::TimeUpdate(position) => this.on_time_update(position),
            EngineEventKind::DurationKnown(duration) => this.on_duration_known(duration),
            EngineEventKind::Ended => this.on_ended(),
            EngineEventKind::Error(reason) => {
                warn!("Load {} failed: {}", this.load, reason);
                this.engine.pause();
                this.state.is_playing = false;
                this.state.is_buffering = false;
                this.state.last_error = Some(PlayerError::Load { reason });
            }
            EngineEventKind::PlayRejected => {
                warn!("Play request for {} was rejected", this.load);
                this.play_issued = false;
                this.state.is_playing = false;
                this.state.last_error = Some(PlayerError::PlaybackRejected);
            }
            EngineEventKind::Stalled => this.state.is_buffering = true,
        });
    }

    fn on_time_update(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        let mut position = position.max(0.0);
        if self.state.duration > 0.0 {
            position = position.min(self.state.duration);
        }
        self.state.position = position;
        self.state.is_buffering = false;
    }

    fn on_duration_known(&mut self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            debug!("Ignoring unusable duration {}", duration);
            return;
        }

        self.loaded = true;
        self.state.duration = duration;
        if duration > 0.0 && self.state.position > duration {
            self.state.position = duration;
        }

        if self.state.is_playing && !self.play_issued {
            self.issue_play();
        }
    }

    fn on_ended(&mut self) {
        let next = self
            .state
            .playlist
            .wrapping_next(self.state.current_index);
        match next.and_then(|index| Some((index, self.state.playlist.get(index)?.clone()))) {
            Some((index, track)) => {
                debug!("Track ended, advancing to index {}", index);
                self.switch_to(index, track, true);
            }
            None => {
                debug!("Single track ended");
                self.state.is_playing = false;
                self.state.is_buffering = false;
                self.state.position = self.state.duration;
            }
        }
    }

    // ===== Internals =====

    /// Run `f` and notify subscribers if it changed the state
    fn transact<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.state.clone();
        let result = f(self);
        if self.state != before {
            self.subscribers.notify(&self.state);
        }
        result
    }

    /// The current load reported an error
    fn load_failed(&self) -> bool {
        matches!(self.state.last_error, Some(PlayerError::Load { .. }))
    }

    fn retry_load(&mut self) {
        if let Some(track) = self.state.current_track.clone() {
            info!("Retrying load of {}", track.id);
            self.switch_to(self.state.current_index, track, true);
        }
    }

    /// Seek back to 0 if the play head sits at the end of the track
    fn rewind_if_finished(&mut self) {
        if self.state.duration > 0.0 && self.state.position >= self.state.duration {
            debug!("Restarting ended track");
            self.engine.seek(0.0);
            self.state.position = 0.0;
        }
    }

    fn current_index(&self) -> Option<usize> {
        self.state
            .current_track
            .as_ref()
            .map(|_| self.state.current_index)
    }

    fn move_to(&mut self, target: Option<usize>) {
        let Some(index) = target else {
            return;
        };
        let Some(track) = self.state.playlist.get(index).cloned() else {
            return;
        };
        self.transact(|this| {
            let keep_playing = this.state.is_playing;
            this.switch_to(index, track, keep_playing);
        });
    }

    /// Make `track` (at `index` of the current playlist) current and load it
    fn switch_to(&mut self, index: usize, track: Track, play: bool) {
        info!(
            "Now on {} \"{}\" by {} (index {})",
            track.id, track.title, track.artist, index
        );

        self.state.current_index = index;
        self.state.position = 0.0;
        self.state.duration = 0.0;
        self.state.is_buffering = false;
        self.state.last_error = None;
        self.state.is_playing = play;

        self.begin_load(&track.audio_url);
        self.state.current_track = Some(track);

        if play {
            self.request_play();
        }
    }

    fn begin_load(&mut self, url: &str) {
        self.load = self.load.next();
        self.play_issued = false;
        self.loaded = false;
        debug!("Loading {} as {}", url, self.load);
        self.engine.load(self.load, url);
    }

    /// Issue `play()` now, or leave it for the duration-known reconciliation
    fn request_play(&mut self) {
        if self.loaded || self.engine.can_play_before_loaded() {
            self.issue_play();
        } else {
            debug!("Deferring play until {} is loaded", self.load);
        }
    }

    fn issue_play(&mut self) {
        debug!("Play {}", self.load);
        self.play_issued = true;
        self.engine.play();
    }

    /// Back to an empty session
    fn clear(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }
        info!("Clearing playback session");
        self.load = self.load.next();
        self.play_issued = false;
        self.loaded = false;
        self.engine.pause();
        self.state = PlaybackState::default();
    }
}
