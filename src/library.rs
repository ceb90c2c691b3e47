//! Local audio files: discovery and session-scoped source urls.
//!
//! A `Track` only carries a display name and a url. The url is issued by the
//! `SourceRegistry` of the running session and means nothing to any other
//! session, even though it is persisted with the playlist.

mod model;
mod scan;
mod source;

pub use model::*;
pub use scan::collect_files;
pub use source::{SourceHandle, SourceRegistry};

#[cfg(test)]
mod tests;
