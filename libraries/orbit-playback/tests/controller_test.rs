//! Integration tests for the player controller
//!
//! Drives the controller through its public API with a scripted engine and
//! checks the transport behavior UI surfaces rely on.

use orbit_core::{Track, TrackId};
use orbit_playback::{
    channel, EngineEventKind, EngineEventSender, LoadId, PlaybackEngine, PlaybackState,
    PlayerConfig, PlayerController, PlayerError, PlayerIntent, Transport,
};
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Load(LoadId, String),
    Play,
    Pause,
    Seek(f64),
}

/// Engine that records every command it receives
#[derive(Debug, Default)]
struct ScriptedEngine {
    commands: Vec<Command>,
    waits_for_metadata: bool,
}

impl ScriptedEngine {
    fn plays(&self) -> usize {
        self.commands.iter().filter(|c| **c == Command::Play).count()
    }

    fn loads(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Load(_, url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PlaybackEngine for ScriptedEngine {
    fn load(&mut self, load: LoadId, url: &str) {
        self.commands.push(Command::Load(load, url.to_string()));
    }

    fn play(&mut self) {
        self.commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.commands.push(Command::Seek(seconds));
    }

    fn can_play_before_loaded(&self) -> bool {
        !self.waits_for_metadata
    }
}

struct Harness {
    player: PlayerController<ScriptedEngine>,
    events: EngineEventSender,
}

impl Harness {
    fn new() -> Self {
        Self::with_engine(ScriptedEngine::default())
    }

    fn with_engine(engine: ScriptedEngine) -> Self {
        let (events, receiver) = channel();
        Self {
            player: PlayerController::new(engine, receiver, PlayerConfig::default()),
            events,
        }
    }

    /// Emit `kind` for the current load and let the controller react
    fn engine_says(&mut self, kind: EngineEventKind) {
        self.events.emit(self.player.current_load(), kind);
        self.player.process_engine_events();
    }

    fn state(&self) -> &PlaybackState {
        self.player.state()
    }

    fn current_id(&self) -> Option<&str> {
        self.state().current_track.as_ref().map(|t| t.id.as_str())
    }
}

fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("https://cdn.example/{id}.mp3"),
        format!("Story {id}"),
        "Uploader",
    )
    .with_cover(format!("https://cdn.example/{id}.jpg"))
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

fn assert_identity(state: &PlaybackState) {
    if let Some(current) = &state.current_track {
        let entry = state
            .playlist
            .get(state.current_index)
            .expect("current index must be in range");
        assert_eq!(entry.id, current.id);
    }
}

// ===== Scenarios =====

#[test]
fn three_track_playlist_walkthrough() {
    let mut h = Harness::new();
    h.player.set_playlist(tracks(&["1", "2", "3"]), 1);

    assert_eq!(h.current_id(), Some("2"));
    assert_eq!(h.state().current_index, 1);
    assert_eq!(h.state().position, 0.0);

    h.player.next_track();
    assert_eq!(h.current_id(), Some("3"));

    h.player.next_track();
    assert_eq!(h.current_id(), Some("1"));
    assert_identity(h.state());
}

#[test]
fn previous_wraps_to_last() {
    let mut h = Harness::new();
    h.player.set_playlist(tracks(&["a", "b", "c"]), 0);

    h.player.previous_track();
    assert_eq!(h.state().current_index, 2);
    assert_eq!(h.current_id(), Some("c"));
}

#[test]
fn single_track_navigation_is_a_no_op() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    let before = h.state().clone();
    let loads = h.player.engine().loads().len();

    h.player.next_track();
    h.player.previous_track();

    assert_eq!(h.state(), &before);
    assert_eq!(h.player.engine().loads().len(), loads);
}

#[test]
fn position_resets_when_switching_tracks() {
    let mut h = Harness::new();
    let list = tracks(&["a", "b"]);
    h.player.play_track(track("a"), Some(list.clone()));
    h.engine_says(EngineEventKind::DurationKnown(200.0));
    h.engine_says(EngineEventKind::TimeUpdate(123.0));
    assert_eq!(h.state().position, 123.0);

    h.player.play_track(track("b"), Some(list));
    assert_eq!(h.state().position, 0.0);
    assert_eq!(h.state().duration, 0.0);
    assert_eq!(h.state().transport(), Transport::Loading);
}

#[test]
fn replaying_the_same_track_restarts_it() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    h.engine_says(EngineEventKind::DurationKnown(60.0));
    h.engine_says(EngineEventKind::TimeUpdate(40.0));

    h.player.play_track(track("a"), None);
    assert_eq!(h.state().position, 0.0);
    assert_eq!(h.player.engine().loads().len(), 2);
}

#[test]
fn single_track_end_stops_at_duration() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::DurationKnown(95.5));
    h.engine_says(EngineEventKind::TimeUpdate(95.0));
    h.engine_says(EngineEventKind::Ended);

    assert!(!h.state().is_playing);
    assert_eq!(h.state().position, 95.5);
    assert_eq!(h.current_id(), Some("a"));
    assert_eq!(h.player.engine().loads().len(), 1);
}

#[test]
fn multi_track_end_advances_and_keeps_playing() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), Some(tracks(&["a", "b"])));
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::DurationKnown(30.0));
    h.engine_says(EngineEventKind::Ended);

    assert_eq!(h.current_id(), Some("b"));
    assert_eq!(h.state().current_index, 1);
    assert!(h.state().is_playing);
    assert_eq!(h.player.engine().commands.last(), Some(&Command::Play));
}

#[test]
fn end_of_last_track_wraps_to_first() {
    let mut h = Harness::new();
    h.player.set_playlist(tracks(&["a", "b"]), 1);
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::DurationKnown(30.0));
    h.engine_says(EngineEventKind::Ended);

    assert_eq!(h.current_id(), Some("a"));
    assert!(h.state().is_playing);
}

#[test]
fn duplicate_ended_does_not_skip_twice() {
    let mut h = Harness::new();
    h.player.set_playlist(tracks(&["a", "b", "c"]), 0);
    h.player.toggle_play_pause();

    let load_a = h.player.current_load();
    h.events.emit(load_a, EngineEventKind::Ended);
    h.events.emit(load_a, EngineEventKind::Ended);
    h.player.process_engine_events();

    assert_eq!(h.current_id(), Some("b"));
}

#[test]
fn late_duration_from_superseded_load_is_ignored() {
    let mut h = Harness::new();
    let list = tracks(&["a", "b"]);

    h.player.play_track(track("a"), Some(list.clone()));
    let load_a = h.player.current_load();
    h.player.play_track(track("b"), Some(list));

    h.events.emit(load_a, EngineEventKind::DurationKnown(321.0));
    h.events.emit(load_a, EngineEventKind::TimeUpdate(12.0));
    h.player.process_engine_events();

    assert_eq!(h.current_id(), Some("b"));
    assert_eq!(h.state().duration, 0.0);
    assert_eq!(h.state().position, 0.0);

    h.engine_says(EngineEventKind::DurationKnown(64.0));
    assert_eq!(h.state().duration, 64.0);
}

#[test]
fn late_ended_from_superseded_load_does_not_advance() {
    let mut h = Harness::new();
    h.player.set_playlist(tracks(&["a", "b", "c"]), 0);
    let load_a = h.player.current_load();
    h.player.next_track();

    h.events.emit(load_a, EngineEventKind::Ended);
    h.player.process_engine_events();

    assert_eq!(h.current_id(), Some("b"));
}

#[test]
fn seek_is_clamped_to_track_bounds() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    h.engine_says(EngineEventKind::DurationKnown(100.0));

    h.player.seek_to(-5.0);
    assert_eq!(h.state().position, 0.0);

    h.player.seek_to(500.0);
    assert_eq!(h.state().position, 100.0);

    h.player.seek_to(42.0);
    assert_eq!(h.state().position, 42.0);
    assert_eq!(h.player.engine().commands.last(), Some(&Command::Seek(42.0)));
}

#[test]
fn rejected_play_reverts_intent() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    h.player.toggle_play_pause();
    assert!(h.state().is_playing);

    h.engine_says(EngineEventKind::PlayRejected);
    assert!(!h.state().is_playing);
    assert_eq!(h.state().last_error, Some(PlayerError::PlaybackRejected));
    assert_eq!(h.current_id(), Some("a"));
}

#[test]
fn load_error_keeps_track_visible() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), Some(tracks(&["a", "b"])));
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::Error("network".to_string()));

    assert!(!h.state().is_playing);
    assert_eq!(h.current_id(), Some("a"));
    assert_eq!(h.state().playlist.len(), 2);
    assert_eq!(h.state().transport(), Transport::Paused);
    assert_identity(h.state());
}

#[test]
fn empty_media_url_is_a_load_error() {
    let mut h = Harness::new();
    let mut broken = track("a");
    broken.audio_url = String::new();

    h.player.play_track(broken, None);
    h.engine_says(EngineEventKind::Error("empty media url".to_string()));

    assert_eq!(
        h.state().last_error,
        Some(PlayerError::Load {
            reason: "empty media url".to_string()
        })
    );
}

#[test]
fn failed_track_stops_audio_and_does_not_advance() {
    let mut h = Harness::new();
    let mut broken = track("b");
    broken.audio_url = String::new();
    let list = vec![track("a"), broken.clone(), track("c")];

    h.player.play_track(track("a"), Some(list.clone()));
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::DurationKnown(120.0));
    h.player.play_track(broken, Some(list));
    h.engine_says(EngineEventKind::Error("empty media url".to_string()));

    assert!(!h.state().is_playing);
    assert_eq!(h.player.engine().commands.last(), Some(&Command::Pause));

    // Leftovers from the previous source, stamped with the failed load
    h.engine_says(EngineEventKind::TimeUpdate(64.0));
    h.engine_says(EngineEventKind::Ended);

    assert_eq!(h.current_id(), Some("b"));
    assert!(!h.state().is_playing);
    assert_eq!(h.state().position, 0.0);
    assert_eq!(h.state().transport(), Transport::Paused);
}

#[test]
fn operations_without_a_track_change_nothing() {
    let mut h = Harness::new();
    let empty = PlaybackState::default();

    h.player.toggle_play_pause();
    h.player.seek_to(10.0);
    h.player.skip_forward(10.0);
    h.player.skip_back(10.0);
    h.player.next_track();
    h.player.previous_track();
    h.player.next_in_subset(|_| true);
    h.player.previous_in_subset(|_| true);
    h.player.set_playlist(Vec::new(), 3);
    h.engine_says(EngineEventKind::TimeUpdate(5.0));
    h.engine_says(EngineEventKind::Ended);

    assert_eq!(h.state(), &empty);
    assert!(h.player.engine().commands.is_empty());
}

#[test]
fn metadata_gated_engine_gets_one_play_per_load() {
    let mut h = Harness::with_engine(ScriptedEngine {
        waits_for_metadata: true,
        ..ScriptedEngine::default()
    });
    h.player.set_playlist(tracks(&["a", "b"]), 0);
    h.player.toggle_play_pause();
    assert_eq!(h.player.engine().plays(), 0);

    h.engine_says(EngineEventKind::DurationKnown(10.0));
    h.engine_says(EngineEventKind::DurationKnown(10.0));
    assert_eq!(h.player.engine().plays(), 1);

    // Switching while playing defers again until the new metadata
    h.player.next_track();
    assert_eq!(h.player.engine().plays(), 1);
    h.engine_says(EngineEventKind::DurationKnown(20.0));
    assert_eq!(h.player.engine().plays(), 2);
}

#[test]
fn paused_switch_does_not_start_playback() {
    let mut h = Harness::with_engine(ScriptedEngine {
        waits_for_metadata: true,
        ..ScriptedEngine::default()
    });
    h.player.set_playlist(tracks(&["a", "b"]), 0);
    h.player.next_track();
    h.engine_says(EngineEventKind::DurationKnown(20.0));

    assert_eq!(h.player.engine().plays(), 0);
    assert_eq!(h.state().transport(), Transport::Paused);
}

#[test]
fn category_navigation_stays_in_subset() {
    let mut h = Harness::new();
    let mut list = tracks(&["m1", "p1", "m2", "p2"]);
    for t in &mut list {
        if t.id.as_str().starts_with('p') {
            t.artist = "Podcaster".to_string();
        }
    }
    h.player.set_playlist(list, 1);

    let podcasts = |t: &Track| t.artist == "Podcaster";
    h.player.next_in_subset(podcasts);
    assert_eq!(h.current_id(), Some("p2"));
    h.player.next_in_subset(podcasts);
    assert_eq!(h.current_id(), Some("p1"));

    // Plain navigation still walks the whole playlist
    h.player.next_track();
    assert_eq!(h.current_id(), Some("m2"));
}

#[test]
fn intents_route_to_operations() {
    let mut h = Harness::new();
    h.player.dispatch(PlayerIntent::SetPlaylist {
        tracks: tracks(&["a", "b", "c"]),
        start_index: 0,
    });
    h.player.dispatch(PlayerIntent::TogglePlayPause);
    h.engine_says(EngineEventKind::DurationKnown(120.0));

    h.player.dispatch(PlayerIntent::SkipForward { seconds: None });
    assert_eq!(h.state().position, 10.0);
    h.player.dispatch(PlayerIntent::SkipForward { seconds: Some(25.0) });
    assert_eq!(h.state().position, 35.0);
    h.player.dispatch(PlayerIntent::SkipBack { seconds: None });
    assert_eq!(h.state().position, 25.0);

    h.player.dispatch(PlayerIntent::PreviousTrack);
    assert_eq!(h.current_id(), Some("c"));
    assert!(h.state().is_playing);

    h.player.dispatch(PlayerIntent::PlayTrack {
        track: track("z"),
        playlist: None,
    });
    assert_eq!(h.current_id(), Some("z"));
    assert_eq!(h.state().playlist.len(), 1);
}

#[test]
fn subscribers_see_every_state_change() {
    let mut h = Harness::new();
    let seen: Rc<RefCell<Vec<(Option<TrackId>, bool)>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    h.player.subscribe(move |state| {
        log.borrow_mut().push((
            state.current_track.as_ref().map(|t| t.id.clone()),
            state.is_playing,
        ));
    });

    h.player.set_playlist(tracks(&["a", "b"]), 0);
    h.player.toggle_play_pause();
    h.player.next_track();
    h.player.toggle_play_pause();

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        vec![
            (Some(TrackId::new("a")), false),
            (Some(TrackId::new("a")), true),
            (Some(TrackId::new("b")), true),
            (Some(TrackId::new("b")), false),
        ]
    );
}

#[test]
fn buffering_flag_tracks_stalls() {
    let mut h = Harness::new();
    h.player.play_track(track("a"), None);
    h.player.toggle_play_pause();
    h.engine_says(EngineEventKind::DurationKnown(50.0));

    h.engine_says(EngineEventKind::Stalled);
    assert!(h.state().is_buffering);
    assert_eq!(h.state().transport(), Transport::Playing);

    h.engine_says(EngineEventKind::TimeUpdate(3.0));
    assert!(!h.state().is_buffering);
}
