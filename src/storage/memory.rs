use super::{SessionStorage, StorageError};
use std::{collections::HashMap, sync::Mutex};

/// In-process storage used by tests and by embedders that do not want a file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a storage pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{TOKEN_KEY, USER_KEY};

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

        storage.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

        // removing twice is fine
        storage.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn with_entries_prepopulates() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{}")]);
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
        assert_eq!(storage.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }
}
