//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the learning code and the
//! storage used for trained tables.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
///
/// A table is always written and read as one unit; there is no partial
/// update or eviction.
///
/// # Examples
///
/// ```no_run
/// use qttt::ports::TableRepository;
/// use qttt::q_learning::QTable;
/// use std::path::Path;
///
/// fn save_table<R: TableRepository>(repo: &R, table: &QTable, path: &Path) -> qttt::Result<()> {
///     repo.save(table, path)
/// }
/// ```
pub trait TableRepository {
    /// Save a table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load a table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file format is invalid, corrupted or of an unknown version
    fn load(&self, path: &Path) -> Result<QTable>;
}
