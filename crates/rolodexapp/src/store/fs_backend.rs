use super::backend::StorageBackend;
use super::{BOOK_FILE, NOTEBOOK_FILE};
use crate::book::AddressBook;
use crate::error::{RolodexError, Result};
use crate::notebook::Notebook;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// JSON files in a single data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(RolodexError::Io)?;
        }
        Ok(())
    }

    fn load<T: DeserializeOwned + Default>(&self, file_name: &str) -> Result<T> {
        let path = self.root.join(file_name);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no saved data, starting empty");
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(RolodexError::Io)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "unreadable data file");
            RolodexError::Serialization(e)
        })?;
        tracing::debug!(path = %path.display(), "loaded");
        Ok(value)
    }

    fn save<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let target = self.root.join(file_name);
        let content = serde_json::to_string_pretty(value).map_err(RolodexError::Serialization)?;

        // Atomic write
        let stem = file_name.trim_end_matches(".json");
        let tmp_file = self.root.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RolodexError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &target) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RolodexError::Io(e));
        }

        tracing::debug!(path = %target.display(), "saved");
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_book(&self) -> Result<AddressBook> {
        self.load(BOOK_FILE)
    }

    fn save_book(&self, book: &AddressBook) -> Result<()> {
        self.save(BOOK_FILE, book)
    }

    fn load_notebook(&self) -> Result<Notebook> {
        self.load(NOTEBOOK_FILE)
    }

    fn save_notebook(&self, notebook: &Notebook) -> Result<()> {
        self.save(NOTEBOOK_FILE, notebook)
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}
