//! Utilities for creating `rodio` sinks from local files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, Sink};

use crate::error::SourceError;
use crate::library::SourceRegistry;

/// Resolve a source url to the file it stands for.
pub(super) fn resolve_source(
    registry: &SourceRegistry,
    url: Option<&str>,
) -> Result<PathBuf, SourceError> {
    let url = url.ok_or(SourceError::NoSource)?;
    registry
        .resolve(url)
        .ok_or_else(|| SourceError::Unknown(url.to_string()))
}

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn create_sink(handle: &OutputStream, path: &Path) -> Result<Sink, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| SourceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
