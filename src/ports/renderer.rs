//! Renderer port - optional visual feedback for live games

use crate::{Result, tictactoe::Board};

/// Produces a representation of the board after each move.
///
/// The game never depends on rendering: the driver logs and ignores errors
/// returned from [`Renderer::render`].
pub trait Renderer {
    /// Draw `board`; `first_player_turn` is the side to move next.
    fn render(&mut self, board: &Board, first_player_turn: bool) -> Result<()>;

    /// Called once with the final board when the game ends.
    fn render_final(&mut self, board: &Board) -> Result<()> {
        self.render(board, false)
    }
}
