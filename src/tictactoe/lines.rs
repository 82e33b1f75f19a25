//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Orientation of a winning line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

impl LineKind {
    /// Classify an entry of [`WINNING_LINES`] by its index
    pub fn of(line_index: usize) -> LineKind {
        match line_index {
            0..=2 => LineKind::Row(line_index),
            3..=5 => LineKind::Column(line_index - 3),
            6 => LineKind::Diagonal,
            _ => LineKind::AntiDiagonal,
        }
    }
}

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        Self::completed_line(cells, player).is_some()
    }

    /// First line (in [`WINNING_LINES`] order) fully held by the player
    pub fn completed_line(cells: &[Cell; 9], player: Player) -> Option<LineKind> {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .position(|line| line.iter().all(|&idx| cells[idx] == target))
            .map(LineKind::of)
    }
}
