//! Participant port - anything that can pick a move for a board
//!
//! The inference driver only needs "given a board, return a chosen move".
//! Humans, the trained agent and scripted opponents all sit behind this
//! trait.

use crate::{Result, tictactoe::Board};

/// A player seat in a live game.
///
/// # Examples
///
/// ```
/// use qttt::{ports::Participant, tictactoe::Board};
///
/// struct FirstEmpty;
///
/// impl Participant for FirstEmpty {
///     fn choose_action(&mut self, board: &Board) -> qttt::Result<usize> {
///         board
///             .empty_cells()
///             .first()
///             .copied()
///             .ok_or_else(|| qttt::Error::InvalidState { state: board.state_key().into_string() })
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
/// ```
pub trait Participant {
    /// Pick the cell (0-8) to play on `board`.
    ///
    /// The returned action is final for the turn; the driver does not retry.
    /// Returning an occupied cell forfeits the game.
    ///
    /// # Errors
    ///
    /// Returns an error when no action can be produced at all, e.g. the board
    /// has no empty cells or an interactive input stream was closed.
    fn choose_action(&mut self, board: &Board) -> Result<usize>;

    /// Name used in reports and logs.
    fn name(&self) -> &str;
}

impl<P: Participant + ?Sized> Participant for Box<P> {
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        (**self).choose_action(board)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
