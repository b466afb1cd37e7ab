//! `<audio>` element engine

use crate::engine::{play_rejection, EngineEventKind, EngineEventSender, LoadId, PlaybackEngine};
use crate::error::{PlayerError, Result};
use js_sys::Function;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, DomException, HtmlAudioElement, MediaError};

type Notify = Rc<dyn Fn()>;

/// Find the audio element with `id`, or create it and attach it to `<body>`
pub fn create_audio_element(id: &str) -> Result<HtmlAudioElement> {
    let unavailable = |what: &str| PlayerError::EngineUnavailable(what.to_string());

    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| unavailable("no document"))?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing
            .dyn_into::<HtmlAudioElement>()
            .map_err(|_| unavailable("element id is taken by a non-audio element"));
    }

    let audio: HtmlAudioElement = document
        .create_element("audio")
        .map_err(|_| unavailable("cannot create <audio>"))?
        .dyn_into()
        .map_err(|_| unavailable("created element is not <audio>"))?;
    audio.set_id(id);
    audio
        .set_attribute("preload", "metadata")
        .map_err(|_| unavailable("cannot set preload"))?;

    let body = document.body().ok_or_else(|| unavailable("no <body>"))?;
    body.append_child(&audio)
        .map_err(|_| unavailable("cannot attach <audio>"))?;

    Ok(audio)
}

/// Engine backed by one `HtmlAudioElement`
///
/// DOM events are translated into [`EngineEventKind`]s tagged with the load
/// that was current when they fired. After each emitted event `notify` is
/// scheduled on the microtask queue so the host can call
/// [`PlayerController::process_engine_events`](crate::PlayerController::process_engine_events)
/// without re-entering the controller.
pub struct HtmlAudioEngine {
    audio: HtmlAudioElement,
    events: EngineEventSender,
    current: Rc<Cell<LoadId>>,
    notify: Notify,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl HtmlAudioEngine {
    /// Wrap `audio`, emitting events on `events`
    pub fn new(
        audio: HtmlAudioElement,
        events: EngineEventSender,
        notify: impl Fn() + 'static,
    ) -> Self {
        let mut engine = Self {
            audio,
            events,
            current: Rc::new(Cell::new(LoadId::NONE)),
            notify: Rc::new(notify),
            listeners: Vec::new(),
        };

        engine.listen("timeupdate", |audio| {
            Some(EngineEventKind::TimeUpdate(audio.current_time()))
        });
        engine.listen("loadedmetadata", duration_event);
        engine.listen("durationchange", duration_event);
        engine.listen("ended", |_| Some(EngineEventKind::Ended));
        engine.listen("error", |audio| {
            Some(EngineEventKind::Error(describe_error(audio.error())))
        });
        engine.listen("waiting", |_| Some(EngineEventKind::Stalled));

        engine
    }

    /// The wrapped element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }

    fn listen<F>(&mut self, name: &'static str, translate: F)
    where
        F: Fn(&HtmlAudioElement) -> Option<EngineEventKind> + 'static,
    {
        let audio = self.audio.clone();
        let events = self.events.clone();
        let current = Rc::clone(&self.current);
        let notify = Rc::clone(&self.notify);

        let closure = Closure::wrap(Box::new(move || {
            if let Some(kind) = translate(&audio) {
                events.emit(current.get(), kind);
                schedule(&notify);
            }
        }) as Box<dyn FnMut()>);

        if let Err(e) = self
            .audio
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref::<Function>())
        {
            warn!("Failed to attach {} listener: {:?}", name, e);
            return;
        }
        self.listeners.push((name, closure));
    }

    fn emit(&self, kind: EngineEventKind) {
        self.events.emit(self.current.get(), kind);
        schedule(&self.notify);
    }
}

impl PlaybackEngine for HtmlAudioEngine {
    fn load(&mut self, load: LoadId, url: &str) {
        self.current.set(load);

        if url.trim().is_empty() {
            // Detach the previous source so none of its events reach this load
            self.pause();
            if let Err(e) = self.audio.remove_attribute("src") {
                warn!("Failed to clear audio src: {:?}", e);
            }
            self.audio.load();
            self.emit(EngineEventKind::Error("empty media url".to_string()));
            return;
        }

        debug!("Setting audio src for {}", load);
        self.audio.set_src(url);
        self.audio.load();
    }

    fn play(&mut self) {
        let load = self.current.get();
        match self.audio.play() {
            Ok(promise) => {
                let events = self.events.clone();
                let notify = Rc::clone(&self.notify);
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        let name = e.dyn_ref::<DomException>().map(DomException::name);
                        debug!("play() for {} failed: {:?}", load, name);
                        if let Some(kind) = play_rejection(name.as_deref()) {
                            events.emit(load, kind);
                            notify();
                        }
                    }
                });
            }
            Err(_) => self.emit(EngineEventKind::PlayRejected),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.audio.pause() {
            warn!("pause() failed: {:?}", e);
        }
    }

    fn seek(&mut self, seconds: f64) {
        if seconds.is_nan() {
            return;
        }
        let duration = self.audio.duration();
        let target = if duration.is_nan() {
            0.0
        } else {
            seconds.clamp(0.0, duration.max(0.0))
        };
        self.audio.set_current_time(target);
    }
}

impl Drop for HtmlAudioEngine {
    fn drop(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            let _ = self
                .audio
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref::<Function>());
        }
        let _ = self.audio.pause();
    }
}

fn duration_event(audio: &HtmlAudioElement) -> Option<EngineEventKind> {
    let duration = audio.duration();
    duration
        .is_finite()
        .then_some(EngineEventKind::DurationKnown(duration))
}

fn describe_error(error: Option<MediaError>) -> String {
    let code = error.map_or(0, |e| e.code());
    match code {
        MediaError::MEDIA_ERR_ABORTED => "media load aborted".to_string(),
        MediaError::MEDIA_ERR_NETWORK => "network error while loading media".to_string(),
        MediaError::MEDIA_ERR_DECODE => "media could not be decoded".to_string(),
        MediaError::MEDIA_ERR_SRC_NOT_SUPPORTED => "media source not supported".to_string(),
        _ => "unable to load media".to_string(),
    }
}

/// Run `notify` after the current task
fn schedule(notify: &Notify) {
    let notify = Rc::clone(notify);
    spawn_local(async move { notify() });
}
