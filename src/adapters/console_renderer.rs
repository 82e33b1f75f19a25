//! Plain-text board renderer

use std::io::Write;

use crate::{
    Result,
    ports::Renderer,
    tictactoe::{Board, Player},
};

/// Writes the board as three `X|O| |` rows followed by whose turn it is
pub struct ConsoleRenderer<W> {
    output: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, board: &Board, first_player_turn: bool) -> Result<()> {
        write!(self.output, "\n{board}")?;
        writeln!(self.output, "Turn: {}", Player::from_turn(first_player_turn))?;
        self.output.flush()?;
        Ok(())
    }

    fn render_final(&mut self, board: &Board) -> Result<()> {
        write!(self.output, "\n{board}")?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_board_and_turn() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        let board = Board::parse("100020000").unwrap();
        renderer.render(&board, true).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "\nX| | |\n |O| |\n | | |\nTurn: X\n");
    }
}
