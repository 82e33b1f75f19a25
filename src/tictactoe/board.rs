//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::StateKey;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Digit used in state keys and persisted boards
    pub fn to_digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::X => '1',
            Cell::O => '2',
        }
    }

    pub fn from_digit(d: u8) -> Option<Cell> {
        match d {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '0' | '.' | ' ' => Some(Cell::Empty),
            '1' | 'X' | 'x' => Some(Cell::X),
            '2' | 'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Symbol used when printing a board
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Player whose turn it is for the given turn flag
    pub fn from_turn(first_player_turn: bool) -> Player {
        if first_player_turn { Player::X } else { Player::O }
    }

    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Nine cells in row-major order.
///
/// `Board` is `Copy`, so every board handed out by the engine is already a
/// detached snapshot; callers cannot reach the engine's internal state
/// through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Board { cells }
    }

    /// Build a board from the numeric encoding (0 empty, 1 X, 2 O).
    ///
    /// # Errors
    ///
    /// Returns error if any digit is outside `0..=2`.
    pub fn from_digits(digits: [u8; BOARD_CELLS]) -> Result<Self, crate::Error> {
        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, &d) in digits.iter().enumerate() {
            cells[i] = Cell::from_digit(d).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: char::from(b'0'.wrapping_add(d)),
                position: i,
                context: format!("{digits:?}"),
            })?;
        }
        Ok(Board { cells })
    }

    /// Parse a board from a 9-character string such as `"110220000"` or
    /// `"XX.OO...."`.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not exactly 9 characters or any
    /// character is not a recognised cell symbol.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != BOARD_CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: usize) -> bool {
        pos < BOARD_CELLS && self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Table key for this board
    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }

    pub(crate) fn place(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            for cell in row {
                write!(f, "{}|", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
