/**
 * In-Memory Storage Gateway
 *
 * Keeps files in a map keyed by (user, canonical path). Directories exist
 * implicitly as prefixes of stored paths, mirroring what the disk gateway
 * reports.
 */

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::backend::storage::{dir_path, file_path, DirEntry, Storage};
use crate::shared::{StorageError, UserIdentity};

/// In-process storage gateway
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<HashMap<UserIdentity, BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, replacing any previous content.
    pub fn insert(&self, user: &UserIdentity, path: &str, contents: impl Into<Vec<u8>>) -> Result<(), StorageError> {
        self.write(user, path, &contents.into())
    }

    pub fn contains(&self, user: &UserIdentity, path: &str) -> bool {
        let Ok(path) = file_path(path) else {
            return false;
        };
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.get(user).is_some_and(|area| area.contains_key(&path))
    }
}

fn is_directory(area: &BTreeMap<String, Vec<u8>>, path: &str) -> bool {
    let prefix = format!("{}/", path);
    area.range(prefix.clone()..).next().is_some_and(|(key, _)| key.starts_with(&prefix))
}

impl Storage for MemoryStorage {
    fn read(&self, user: &UserIdentity, path: &str) -> Result<Vec<u8>, StorageError> {
        let path = file_path(path)?;
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let Some(area) = files.get(user) else {
            return Err(StorageError::NotFound { path });
        };
        if let Some(contents) = area.get(&path) {
            return Ok(contents.clone());
        }
        if is_directory(area, &path) {
            return Err(StorageError::IsDirectory { path });
        }
        Err(StorageError::NotFound { path })
    }

    fn write(&self, user: &UserIdentity, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        let path = file_path(path)?;
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let area = files.entry(user.clone()).or_default();
        if is_directory(area, &path) {
            return Err(StorageError::IsDirectory { path });
        }
        area.insert(path, contents.to_vec());
        Ok(())
    }

    fn delete(&self, user: &UserIdentity, path: &str) -> Result<(), StorageError> {
        let path = file_path(path)?;
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let Some(area) = files.get_mut(user) else {
            return Err(StorageError::NotFound { path });
        };
        if area.remove(&path).is_some() {
            return Ok(());
        }
        if is_directory(area, &path) {
            return Err(StorageError::IsDirectory { path });
        }
        Err(StorageError::NotFound { path })
    }

    fn list(&self, user: &UserIdentity, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let path = dir_path(path)?;
        let prefix = if path.is_empty() { String::new() } else { format!("{}/", path) };
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());

        // name -> is_dir; BTreeMap keeps the listing sorted
        let mut entries: BTreeMap<String, bool> = BTreeMap::new();
        if let Some(area) = files.get(user) {
            for key in area.keys().filter(|key| key.starts_with(&prefix)) {
                let rest = &key[prefix.len()..];
                match rest.split_once('/') {
                    Some((dir, _)) => {
                        entries.insert(dir.to_string(), true);
                    }
                    None => {
                        entries.entry(rest.to_string()).or_insert(false);
                    }
                }
            }
        }

        if entries.is_empty() && !path.is_empty() {
            return Err(StorageError::NotFound { path });
        }
        Ok(entries
            .into_iter()
            .map(|(name, is_dir)| DirEntry { name, is_dir })
            .collect())
    }
}
