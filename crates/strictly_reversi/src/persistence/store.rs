//! Durable storage for saved games.

use super::error::PersistenceError;
use super::record::GameRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Somewhere a game record can be saved to and loaded from.
pub trait GameStore {
    /// Writes the record, replacing any previous one.
    fn save(&mut self, record: &GameRecord) -> Result<(), PersistenceError>;

    /// Reads and validates the stored record.
    fn load(&self) -> Result<GameRecord, PersistenceError>;
}

/// A save file on disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a half-written record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    /// Creates a store for `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the save path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl GameStore for SaveFile {
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn save(&mut self, record: &GameRecord) -> Result<(), PersistenceError> {
        let temp = self.temp_path();
        std::fs::write(&temp, record.encode())?;
        std::fs::rename(&temp, &self.path)?;
        debug!("Game saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<GameRecord, PersistenceError> {
        let content = std::fs::read_to_string(&self.path)?;
        let record = GameRecord::decode(&content)?;
        debug!("Game loaded");
        Ok(record)
    }
}

/// In-memory store holding the encoded text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    content: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with raw text.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// Raw stored text.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl GameStore for MemoryStore {
    fn save(&mut self, record: &GameRecord) -> Result<(), PersistenceError> {
        self.content = Some(record.encode());
        Ok(())
    }

    fn load(&self) -> Result<GameRecord, PersistenceError> {
        let content = self.content.as_deref().ok_or_else(|| {
            PersistenceError::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no saved game",
            ))
        })?;
        GameRecord::decode(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::modes::PlayerModes;
    use crate::types::Disk;

    #[test]
    fn test_save_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SaveFile::new(dir.path().join("game.txt"));
        let record = GameRecord::new(Some(Disk::Light), PlayerModes::default(), Board::new());

        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);
        assert!(!dir.path().join("game.txt.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveFile::new(dir.path().join("absent.txt"));
        let err = store.load().unwrap_err();
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SaveFile::new(dir.path().join("nope").join("game.txt"));
        let record = GameRecord::new(Some(Disk::Dark), PlayerModes::default(), Board::new());
        assert!(store.save(&record).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_err());
        let record = GameRecord::new(None, PlayerModes::default(), Board::new());
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);
    }
}
