use crate::error::StorageError;
use crate::library::Track;
use crate::storage::{Persisted, StorageHandle};

use super::index::clamp_index;

pub const PLAYLIST_KEY: &str = "playlist";
pub const CURRENT_TRACK_INDEX_KEY: &str = "currentTrackIndex";
pub const CURRENT_TIME_KEY: &str = "currentTime";

/// The playlist, the current track index and the last playback time, each
/// persisted under its own key.
///
/// The keys are written independently, so the stored index may not fit the
/// stored playlist. Reads go through `current_index`, which clamps.
pub struct PlaylistState {
    playlist: Persisted<Vec<Track>>,
    current_index: Persisted<usize>,
    current_time: Persisted<f64>,
}

impl PlaylistState {
    /// Restore the state from `storage`, defaulting every missing key.
    pub fn load(storage: StorageHandle) -> Self {
        Self {
            playlist: Persisted::load(storage.clone(), PLAYLIST_KEY, Vec::new()),
            current_index: Persisted::load(storage.clone(), CURRENT_TRACK_INDEX_KEY, 0),
            current_time: Persisted::load(storage, CURRENT_TIME_KEY, 0.0),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        self.playlist.get()
    }

    pub fn len(&self) -> usize {
        self.playlist.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.get().is_empty()
    }

    /// The current index, clamped to the playlist. `0` when empty.
    pub fn current_index(&self) -> usize {
        clamp_index(*self.current_index.get(), self.len())
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks().get(self.current_index())
    }

    /// Seconds into the active track at the last time update.
    pub fn current_time(&self) -> f64 {
        *self.current_time.get()
    }

    pub(super) fn set_tracks(&mut self, tracks: Vec<Track>) -> Result<(), StorageError> {
        self.playlist.set(tracks)
    }

    pub(super) fn update_index<F>(&mut self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(usize, usize) -> usize,
    {
        let len = self.len();
        self.current_index.update(|&index| f(index, len))
    }

    pub(super) fn set_index(&mut self, index: usize) -> Result<(), StorageError> {
        self.current_index.set(index)
    }

    pub(super) fn set_time(&mut self, seconds: f64) -> Result<(), StorageError> {
        self.current_time.set(seconds)
    }
}
