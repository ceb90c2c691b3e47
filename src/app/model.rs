//! Application model types: `App`, `InputMode` and `PlaybackState`.

use std::path::PathBuf;

use crate::audio::MediaHandle;

/// What the media handle is doing, as shown in the status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No audio output could be opened.
    Unavailable,
    #[default]
    Paused,
    Playing,
    Ended,
}

impl PlaybackState {
    pub fn observe(media: Option<&dyn MediaHandle>) -> Self {
        match media {
            None => Self::Unavailable,
            Some(m) if m.is_ended() => Self::Ended,
            Some(m) if m.is_paused() => Self::Paused,
            Some(_) => Self::Playing,
        }
    }
}

/// Whether keys drive the transport or edit the "add files" prompt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    AddFiles,
}

/// The presentation model.
#[derive(Debug, Default)]
pub struct App {
    /// Row under the cursor in the playlist view.
    pub cursor: usize,
    pub playback: PlaybackState,
    pub input_mode: InputMode,
    pub input: String,
    /// Last message worth showing to the user (errors, load results).
    pub notice: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_down(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor.min(len - 1) + 1) % len;
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_up(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = match self.cursor.min(len - 1) {
            0 => len - 1,
            c => c - 1,
        };
    }

    /// Put the cursor on the current track.
    pub fn follow(&mut self, current_index: usize) {
        self.cursor = current_index;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn enter_add_mode(&mut self) {
        self.input_mode = InputMode::AddFiles;
        self.input.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }

    /// Leave the prompt and return the whitespace-separated paths typed into it.
    pub fn take_input_paths(&mut self) -> Vec<PathBuf> {
        let paths = self.input.split_whitespace().map(PathBuf::from).collect();
        self.cancel_input();
        paths
    }
}
