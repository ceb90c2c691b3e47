use std::sync::{MutexGuard, PoisonError};

use log::{debug, info};

use crate::audio::MediaHandle;
use crate::error::{PlaybackError, StorageError};
use crate::library::{LocalFile, SourceHandle, SourceRegistry, Track};

use super::index::{ended_index, next_index, previous_index};
use super::state::PlaylistState;

/// Transport controller: play, pause, skip, load and clear.
///
/// Index-changing operations return `StorageError` when the new state cannot
/// be persisted; callers treat that as fatal. `play` reports its own
/// non-fatal failures as `PlaybackError`.
pub struct Transport {
    state: PlaylistState,
    sources: SourceHandle,
}

impl Transport {
    pub fn new(state: PlaylistState, sources: SourceHandle) -> Self {
        Self { state, sources }
    }

    pub fn state(&self) -> &PlaylistState {
        &self.state
    }

    /// Start the current track if the media handle is idle.
    ///
    /// The source is reassigned before playing, so a paused track restarts
    /// from its beginning. A handle that is already playing is left alone.
    /// Whether playback actually starts is reported later by the handle.
    pub fn play(&self, media: Option<&mut dyn MediaHandle>) -> Result<(), PlaybackError> {
        let Some(track) = self.state.current_track() else {
            return Err(PlaybackError::EmptyPlaylist);
        };
        let Some(media) = media else {
            return Err(PlaybackError::MediaUnavailable);
        };

        if media.is_paused() || media.is_ended() {
            debug!("playing {:?} from {}", track.name, track.url);
            media.set_source(Some(&track.url));
            media.play();
        }
        Ok(())
    }

    pub fn pause(&self, media: Option<&mut dyn MediaHandle>) {
        if let Some(media) = media {
            media.pause();
        }
    }

    pub fn next(&mut self) -> Result<(), StorageError> {
        self.state.update_index(next_index)
    }

    pub fn previous(&mut self) -> Result<(), StorageError> {
        self.state.update_index(previous_index)
    }

    /// Make `index` the current track. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> Result<bool, StorageError> {
        if index >= self.state.len() {
            return Ok(false);
        }
        self.state.set_index(index)?;
        Ok(true)
    }

    pub fn on_track_ended(&mut self) -> Result<(), StorageError> {
        self.state.update_index(ended_index)
    }

    /// Record the playback position. Nothing reads it back for seeking.
    pub fn on_time_update(&mut self, seconds: f64) -> Result<(), StorageError> {
        if !seconds.is_finite() || seconds < 0.0 {
            debug!("ignoring time update {seconds}");
            return Ok(());
        }
        self.state.set_time(seconds)
    }

    /// Append `files` in order and restart from the first track.
    ///
    /// The index is reset even when appending to a non-empty playlist, which
    /// drops the track that was current. If the playlist cannot be stored the
    /// new urls are released again.
    pub fn add_files(&mut self, files: Vec<LocalFile>) -> Result<(), StorageError> {
        let added: Vec<Track> = {
            let mut sources = self.lock_sources();
            files
                .into_iter()
                .map(|file| Track {
                    url: sources.acquire(&file.path),
                    name: file.name,
                })
                .collect()
        };

        let mut tracks = self.state.tracks().to_vec();
        tracks.extend(added.iter().cloned());
        if let Err(e) = self.state.set_tracks(tracks) {
            self.release(&added);
            return Err(e);
        }

        info!("playlist now holds {} tracks", self.state.len());
        self.state.set_index(0)
    }

    /// Empty the playlist, reset index and time, and release every source
    /// the removed tracks held.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        let removed = self.state.tracks().to_vec();
        self.state.set_tracks(Vec::new())?;
        self.release(&removed);

        self.state.set_index(0)?;
        self.state.set_time(0.0)
    }

    fn lock_sources(&self) -> MutexGuard<'_, SourceRegistry> {
        self.sources.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, tracks: &[Track]) {
        let mut sources = self.lock_sources();
        let released = tracks.iter().filter(|t| sources.release(&t.url)).count();
        debug!("released {released} sources, {} still live", sources.len());
    }
}
