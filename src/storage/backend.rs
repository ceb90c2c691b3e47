//! The storage port and its shared handle.

use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// A string-to-string store that outlives the session.
pub trait Storage {
    /// Return the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Storage shared between every persisted value of a session.
pub type StorageHandle = Arc<Mutex<dyn Storage + Send>>;

/// Wrap a backend into a `StorageHandle`.
pub fn shared<S: Storage + Send + 'static>(storage: S) -> StorageHandle {
    Arc::new(Mutex::new(storage))
}

/// Size in bytes a set of entries occupies, counting keys and values.
pub(super) fn footprint<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> usize {
    entries.map(|(k, v)| k.len() + v.len()).sum()
}

/// Check that replacing `key` with `value` keeps the store within `quota`.
pub(super) fn check_quota<'a>(
    entries: impl Iterator<Item = (&'a String, &'a String)>,
    key: &str,
    value: &str,
    quota: Option<usize>,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let others = footprint(entries.filter(|(k, _)| k.as_str() != key));
    if others + key.len() + value.len() > quota {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            quota,
        });
    }
    Ok(())
}
