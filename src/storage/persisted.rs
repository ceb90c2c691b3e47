//! A single named value mirrored into storage.

use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

use super::backend::StorageHandle;

/// A value that is loaded from storage once and written back on every change.
///
/// Each container owns exactly one key; there is no transaction spanning
/// several containers.
pub struct Persisted<T> {
    key: String,
    value: T,
    storage: StorageHandle,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key` from `storage`, falling back to `initial` when the key is
    /// absent, empty or does not deserialize as `T`.
    pub fn load(storage: StorageHandle, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();

        let stored = match storage.lock() {
            Ok(s) => s.get(&key),
            Err(_) => {
                warn!("storage handle poisoned while loading {key:?}, using default");
                None
            }
        };

        let value = match stored.as_deref() {
            None | Some("") => initial,
            Some(raw) => match serde_json::from_str::<T>(raw) {
                Ok(v) => v,
                Err(e) => {
                    debug!("ignoring malformed snapshot for {key:?}: {e}");
                    initial
                }
            },
        };

        Self {
            key,
            value,
            storage,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Write `value` through to storage, then make it the current value.
    /// On failure the current value is left as it was.
    pub fn set(&mut self, value: T) -> Result<(), StorageError> {
        self.write(&value)?;
        self.value = value;
        Ok(())
    }

    /// Derive the next value from the current one and write it through.
    pub fn update<F>(&mut self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next)
    }

    fn write(&self, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;

        let mut storage = self.storage.lock().map_err(|_| StorageError::Poisoned)?;
        storage.set(&self.key, raw)
    }
}
