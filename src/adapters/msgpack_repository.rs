//! MessagePack implementation of the table repository.
//!
//! This adapter implements the TableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    fs::{self, File},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use log::warn;

use crate::{
    Result,
    error::Error,
    ports::TableRepository,
    q_learning::{QTable, SavedQTable},
};

/// MessagePack-based table repository.
///
/// Writes go to a sibling `.tmp` file that is renamed over the target once
/// fully flushed, so a reader never observes a half-written table.
///
/// # Examples
///
/// ```no_run
/// use qttt::adapters::MsgPackRepository;
/// use qttt::ports::TableRepository;
/// use qttt::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// repo.save(&QTable::new(), Path::new("qtable.msgpack"))?;
/// let loaded = repo.load(Path::new("qtable.msgpack"))?;
/// # Ok::<(), qttt::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn discard(temp: &Path) {
        if let Err(e) = fs::remove_file(temp) {
            warn!("could not remove partial table {temp:?}: {e}");
        }
    }
}

impl TableRepository for MsgPackRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let bytes = SavedQTable::new(table.clone()).to_bytes()?;
        let temp = Self::temp_path(path);

        let mut file = File::create(&temp).map_err(|source| Error::Io {
            operation: format!("create file {temp:?}"),
            source,
        })?;
        let written = file.write_all(&bytes).and_then(|()| file.sync_all());
        drop(file);
        if let Err(source) = written {
            Self::discard(&temp);
            return Err(Error::Io {
                operation: format!("write file {temp:?}"),
                source,
            });
        }

        if let Err(source) = fs::rename(&temp, path) {
            Self::discard(&temp);
            return Err(Error::Io {
                operation: format!("move {temp:?} to {path:?}"),
                source,
            });
        }

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let mut file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|source| Error::Io {
            operation: format!("read file {path:?}"),
            source,
        })?;

        Ok(SavedQTable::from_bytes(&bytes)?.into_table())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::types::StateKey;

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("table.msgpack");

        let mut table = QTable::new();
        let state = StateKey::parse("000010000").unwrap();
        table.seed_state(&state, &[0, 1, 2, 3, 5, 6, 7, 8]);
        table.set(state.clone(), 0, -1.25);

        let repo = MsgPackRepository::new();
        repo.save(&table, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, table);
        assert!(!MsgPackRepository::temp_path(&file_path).exists());
    }

    #[test]
    fn test_save_overwrites_existing_table() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("table.msgpack");
        let repo = MsgPackRepository::new();

        let mut table = QTable::new();
        let state = StateKey::parse("000000000").unwrap();
        table.set(state.clone(), 4, 1.0);
        repo.save(&table, &file_path).unwrap();
        table.set(state.clone(), 4, 2.0);
        repo.save(&table, &file_path).unwrap();

        assert_eq!(repo.load(&file_path).unwrap().get(&state, 4), 2.0);
    }

    #[test]
    fn test_failed_save_leaves_no_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // A directory in the way makes the final rename fail
        let file_path = temp_dir.path().join("table.msgpack");
        fs::create_dir(&file_path).unwrap();

        let repo = MsgPackRepository::new();
        let result = repo.save(&QTable::new(), &file_path);

        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!MsgPackRepository::temp_path(&file_path).exists());
        assert!(file_path.is_dir());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_qttt_12345.msgpack"));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.save(&QTable::new(), Path::new("/invalid_dir_12345/table.msgpack"));
        assert!(result.is_err());
    }
}
