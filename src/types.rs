//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, Cell};

/// Lookup key for a board in the Q-table.
///
/// The key is the nine cell digits in index order (`0` empty, `1` first
/// player, `2` second player). Two boards with the same contents always map
/// to the same key; move history is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Parse a key, validating that it describes a board.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not nine digits in `0..=2`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let stray = s
            .chars()
            .enumerate()
            .find(|&(_, c)| !matches!(c, '0'..='2'));
        if let Some((position, character)) = stray {
            return Err(crate::Error::InvalidCellCharacter {
                character,
                position,
                context: s.to_string(),
            });
        }
        let board = Board::parse(s)?;
        Ok(Self::from(&board))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey(board.cells().iter().map(|&c| Cell::to_digit(c)).collect())
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
