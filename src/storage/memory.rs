use std::collections::HashMap;

use crate::error::StorageError;

use super::backend::{Storage, check_quota};

/// In-process storage. Nothing survives the session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new(quota: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            quota,
        }
    }

    /// Seed the store with raw entries, bypassing the quota.
    #[cfg(test)]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            quota: None,
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        check_quota(self.entries.iter(), key, &value, self.quota)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
