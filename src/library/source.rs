//! Session-scoped source urls for local files.
//!
//! Urls look like `local://<session>/<n>`. A url resolves only inside the
//! session that issued it and only until it is released.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

const SCHEME: &str = "local://";

#[derive(Debug)]
pub struct SourceRegistry {
    session: String,
    next_id: u64,
    sources: HashMap<String, PathBuf>,
}

/// Registry shared by the transport (acquire/release) and the audio thread (resolve).
pub type SourceHandle = Arc<Mutex<SourceRegistry>>;

impl SourceRegistry {
    /// Create a registry with a session id unique to this process run.
    pub fn new() -> Self {
        Self::with_session(Uuid::new_v4().to_string())
    }

    pub fn with_session(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            next_id: 0,
            sources: HashMap::new(),
        }
    }

    /// Issue a fresh url for `path`.
    pub fn acquire(&mut self, path: &Path) -> String {
        let url = format!("{SCHEME}{}/{}", self.session, self.next_id);
        self.next_id += 1;
        self.sources.insert(url.clone(), path.to_path_buf());
        url
    }

    /// Map a url back to the file it was issued for.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        self.sources.get(url).cloned()
    }

    /// Forget `url`. Returns whether it was live.
    pub fn release(&mut self, url: &str) -> bool {
        self.sources.remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
