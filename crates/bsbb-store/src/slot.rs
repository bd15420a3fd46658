//! String key-value slots backing the directory store.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Minimal string key-value storage. Values are whole documents; there is
/// no partial update.
pub trait KeyValueSlot {
    /// Returns the stored value, or `None` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process slot, lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// One file per key under a data directory.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slot_get_set_remove() {
        let mut slot = MemorySlot::new();
        assert!(slot.get("bsbb-data").unwrap().is_none());

        slot.set("bsbb-data", "{}").unwrap();
        assert_eq!(slot.get("bsbb-data").unwrap().as_deref(), Some("{}"));

        slot.remove("bsbb-data").unwrap();
        slot.remove("bsbb-data").unwrap();
        assert!(slot.get("bsbb-data").unwrap().is_none());
    }

    #[test]
    fn file_slot_creates_directory_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let mut slot = FileSlot::new(tmp.path().join("nested").join("data"));

        assert!(slot.get("bsbb-data").unwrap().is_none());
        slot.set("bsbb-data", "first").unwrap();
        slot.set("bsbb-data", "second").unwrap();

        assert_eq!(slot.get("bsbb-data").unwrap().as_deref(), Some("second"));
        assert!(!slot.dir().join(".bsbb-data.tmp").exists());
    }

    #[test]
    fn file_slot_remove_missing_key_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let mut slot = FileSlot::new(tmp.path());
        slot.remove("bsbb-google-api-key").unwrap();

        slot.set("bsbb-google-api-key", "k").unwrap();
        slot.remove("bsbb-google-api-key").unwrap();
        assert!(slot.get("bsbb-google-api-key").unwrap().is_none());
    }

    #[test]
    fn file_slot_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let mut slot = FileSlot::new(tmp.path());
        for key in ["../escape", "a/b", "", "dot.key"] {
            assert!(
                matches!(slot.set(key, "x"), Err(StoreError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
