use std::path::PathBuf;

use log::{info, warn};

use crate::config::{LibrarySettings, Settings, StorageBackend, StorageSettings};
use crate::error::StorageError;
use crate::library::collect_files;
use crate::playlist::Transport;
use crate::storage::{FileStorage, MemoryStorage, StorageHandle, shared};

/// Load and validate settings. A broken config never stops the player: the
/// problem is printed (no logger exists yet) and defaults are used.
pub fn load_settings() -> Settings {
    let problem = match Settings::load() {
        Ok(settings) => match settings.validate() {
            Ok(()) => return settings,
            Err(msg) => format!("invalid config: {msg}"),
        },
        Err(e) => format!("failed to load config: {e}"),
    };
    eprintln!("reel: {problem}; using defaults");
    Settings::default()
}

/// Open the configured storage backend.
pub fn open_storage(settings: &StorageSettings) -> StorageHandle {
    match (settings.backend, settings.resolved_path()) {
        (StorageBackend::File, Some(path)) => {
            let storage = FileStorage::open(path, settings.quota_bytes);
            info!("using storage file {}", storage.path().display());
            shared(storage)
        }
        (StorageBackend::File, None) => {
            warn!("no storage location available, playlist will not survive a restart");
            shared(MemoryStorage::new(settings.quota_bytes))
        }
        (StorageBackend::Memory, _) => {
            info!("using in-memory storage");
            shared(MemoryStorage::new(settings.quota_bytes))
        }
    }
}

/// Load files named on the command line, the same way the "add" prompt does.
pub fn add_initial_files(
    transport: &mut Transport,
    paths: &[PathBuf],
    settings: &LibrarySettings,
) -> Result<(), StorageError> {
    if paths.is_empty() {
        return Ok(());
    }

    let files = collect_files(paths, settings);
    if files.is_empty() {
        warn!("no audio files found in command line arguments");
        return Ok(());
    }
    transport.add_files(files)
}
