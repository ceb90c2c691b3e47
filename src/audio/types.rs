//! Audio-related small types and handles.
//!
//! This module defines the media handle port, the commands sent to the audio
//! thread, the events it sends back and the playback info it shares.

use std::sync::{Arc, Mutex};

use crate::error::SourceError;

/// A playable media element.
///
/// `set_source` loads without playing. `play` is a request: a failure to
/// start is reported asynchronously as `MediaEvent::StartFailed`.
pub trait MediaHandle {
    fn set_source(&mut self, url: Option<&str>);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source; playback stops and rewinds.
    Load(Option<String>),
    /// Start or resume the loaded source.
    Play,
    /// Pause playback.
    Pause,
    /// Stop and shut the audio thread down.
    Quit,
}

/// Notifications from the audio thread to the event loop.
///
/// `source` is the url that was loaded when the event was produced. Events
/// may still be queued after another source has been loaded.
#[derive(Debug)]
pub enum MediaEvent {
    /// The playing source ran out.
    Ended { source: Option<String> },
    /// Seconds elapsed in the playing source.
    TimeUpdate { source: Option<String>, seconds: f64 },
    /// A play request could not be carried out.
    StartFailed(SourceError),
}

#[derive(Debug, Clone)]
/// Runtime playback information shared with the event loop.
pub struct PlaybackInfo {
    /// Whether playback is paused (true until the first successful play).
    pub paused: bool,
    /// Whether the loaded source played to its end.
    pub ended: bool,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            paused: true,
            ended: false,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
