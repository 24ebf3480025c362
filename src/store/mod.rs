//! Durable on-disk paste storage, one JSON file per paste.

use crate::error::AppError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};


/// File-backed paste store. The store is the source of truth; the cache in
/// front of it is purely a latency optimization.
pub struct PasteStore {
    root: PathBuf,
}

impl PasteStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns an I/O error when the directory cannot be created. Callers
    /// treat this as fatal at startup.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, AppError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn paste_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Whether a durable record for `id` is present.
    pub fn exists(&self, id: &str) -> bool {
        is_valid_id(id) && self.paste_path(id).is_file()
    }

    /// Write a new serialized record with exclusive-creation semantics:
    /// the first writer wins and a second create for the same id fails with
    /// [`AppError::AlreadyExists`]. Existing records are never overwritten.
    ///
    /// # Errors
    /// `AlreadyExists` on id collision, otherwise the underlying I/O error.
    pub fn create(&self, id: &str, serialized: &str) -> Result<(), AppError> {
        let path = self.paste_path(id);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(AppError::AlreadyExists(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    /// Read the raw serialized record for `id`. Parsing happens at the
    /// caller, which maps serde failures to [`AppError::Corrupt`].
    ///
    /// # Errors
    /// `NotFound` when no record exists, otherwise the underlying I/O error.
    pub fn read(&self, id: &str) -> Result<String, AppError> {
        if !is_valid_id(id) {
            return Err(AppError::NotFound);
        }
        match fs::read_to_string(self.paste_path(id)) {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}

/// Generated ids are lowercase hex; anything else never touches the
/// filesystem (path-traversal guard).
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}
