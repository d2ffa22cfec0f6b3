/**
 * Disk Storage Gateway
 *
 * Stores every user's files under `root/<username>`. A user's area is created
 * on first access and seeded with a copy of the template directory, if one is
 * configured.
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::backend::storage::{dir_path, file_path, DirEntry, Storage};
use crate::shared::{StorageError, UserIdentity};

/// Disk-backed storage gateway
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    template: Option<PathBuf>,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>, template: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            template,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve (and bootstrap, if needed) the user's area.
    pub fn user_home(&self, user: &UserIdentity) -> Result<PathBuf, StorageError> {
        let name = user.username();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(StorageError::InvalidPath { path: name.to_string() });
        }

        let home = self.root.join(name);
        if !home.exists() {
            fs::create_dir_all(&home)?;
            if let Some(template) = &self.template {
                if let Err(e) = copy_dir(template, &home) {
                    // The area stays usable without the template.
                    tracing::warn!(
                        "Couldn't copy template \"{}\" to new user directory \"{}\": {}",
                        template.display(),
                        home.display(),
                        e
                    );
                }
            }
            tracing::info!("Created storage area for {}", user);
        }
        Ok(home)
    }

    fn resolve_file(&self, user: &UserIdentity, path: &str) -> Result<(String, PathBuf), StorageError> {
        let relative = file_path(path)?;
        let full = self.user_home(user)?.join(&relative);
        Ok((relative, full))
    }
}

impl Storage for FileStorage {
    fn read(&self, user: &UserIdentity, path: &str) -> Result<Vec<u8>, StorageError> {
        let (relative, full) = self.resolve_file(user, path)?;
        if full.is_dir() {
            return Err(StorageError::IsDirectory { path: relative });
        }
        fs::read(&full).map_err(|e| not_found_or_io(e, relative))
    }

    fn write(&self, user: &UserIdentity, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        let (relative, full) = self.resolve_file(user, path)?;
        if full.is_dir() {
            return Err(StorageError::IsDirectory { path: relative });
        }
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, contents)?;
        tracing::debug!("Wrote {} bytes to ~{}/{}", contents.len(), user, relative);
        Ok(())
    }

    fn delete(&self, user: &UserIdentity, path: &str) -> Result<(), StorageError> {
        let (relative, full) = self.resolve_file(user, path)?;
        if full.is_dir() {
            return Err(StorageError::IsDirectory { path: relative });
        }
        fs::remove_file(&full).map_err(|e| not_found_or_io(e, relative))
    }

    fn list(&self, user: &UserIdentity, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let relative = dir_path(path)?;
        let full = self.user_home(user)?.join(&relative);
        let reader = fs::read_dir(&full).map_err(|e| not_found_or_io(e, relative.clone()))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn not_found_or_io(err: io::Error, path: String) -> StorageError {
    match err.kind() {
        // read_dir on a regular file
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => StorageError::NotFound { path },
        _ => StorageError::Io(err),
    }
}

fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
