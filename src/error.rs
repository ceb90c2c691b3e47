//! Error types shared across the player.
//!
//! Storage failures are fatal for the session; playback failures are
//! reported and then ignored.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to persist a value to the storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the backing file failed.
    #[error("failed to write storage file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value for key {key:?}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Another holder of the storage handle panicked mid-write.
    #[error("storage handle is poisoned")]
    Poisoned,

    /// The write would grow the store past its configured quota.
    #[error("writing key {key:?} would exceed the storage quota of {quota} bytes")]
    QuotaExceeded { key: String, quota: usize },
}

/// A transport request that could not be carried out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playlist is empty")]
    EmptyPlaylist,

    #[error("audio output is not available")]
    MediaUnavailable,
}

/// Failure to start playing a source, reported by the audio thread.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no audio source is loaded")]
    NoSource,

    /// The url was issued by another session or has been released.
    #[error("source {0} is no longer available")]
    Unknown(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
}
