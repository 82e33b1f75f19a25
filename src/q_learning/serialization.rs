//! Versioned on-disk envelope for Q-tables.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::QTable};

/// The persisted form of a Q-table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub table: QTable,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(table: QTable) -> Self {
        Self {
            version: Self::VERSION,
            table,
        }
    }

    /// Encode as MessagePack
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize Q-table to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack, rejecting unknown versions
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let saved: SavedQTable =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        if saved.version != Self::VERSION {
            return Err(Error::SerializationContext {
                operation: "load Q-table".to_string(),
                message: format!(
                    "unsupported save format version {} (expected {})",
                    saved.version,
                    Self::VERSION
                ),
            });
        }

        Ok(saved)
    }

    pub fn into_table(self) -> QTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateKey;

    #[test]
    fn test_roundtrip_preserves_values() -> Result<()> {
        let mut table = QTable::new();
        let state = StateKey::parse("120000000")?;
        table.seed_state(&state, &[2, 3, 4, 5, 6, 7, 8]);
        table.set(state.clone(), 4, 3.25);

        let bytes = SavedQTable::new(table.clone()).to_bytes()?;
        let restored = SavedQTable::from_bytes(&bytes)?.into_table();

        assert_eq!(restored, table);
        assert_eq!(restored.get(&state, 4), 3.25);
        Ok(())
    }

    #[test]
    fn test_unknown_version_is_rejected() -> Result<()> {
        let mut saved = SavedQTable::new(QTable::new());
        saved.version = 99;
        let bytes = saved.to_bytes()?;

        let err = SavedQTable::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("version 99"));
        Ok(())
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(SavedQTable::from_bytes(b"not a table").is_err());
        assert!(SavedQTable::from_bytes(&[]).is_err());
    }
}
