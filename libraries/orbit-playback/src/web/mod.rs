//! Browser playback engine (wasm32, `web` feature)

mod engine;

pub use engine::{create_audio_element, HtmlAudioEngine};
