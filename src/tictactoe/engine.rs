//! Game rules state machine
//!
//! [`GameEngine`] owns one game from the empty board to a terminal state.
//! Moves onto an occupied cell are not rejected: they end the game as a loss
//! for the mover (the "cheat" outcome), so every game concludes with a
//! well-defined reward and winner.

use serde::{Deserialize, Serialize};

use super::board::{BOARD_CELLS, Board, Player};

/// Reward for the move that completes a line
pub const WIN_REWARD: f64 = 10.0;
/// Reward for the move that fills the last cell without a winner
pub const TIE_REWARD: f64 = 2.0;
/// Reward for a move onto an occupied cell
pub const LOSS_REWARD: f64 = -10.0;

/// Lifecycle of a game. Every variant except `InProgress` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
    /// The loser played an occupied cell; `winner` is the other player.
    CheatedLoss { winner: Player },
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Winning player, if the game ended decisively
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) | GameStatus::CheatedLoss { winner: player } => Some(player),
            GameStatus::InProgress | GameStatus::Tied => None,
        }
    }
}

/// Side information returned with every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Turn flag after this move (`true` when the first player moves next).
    /// Only meaningful while the game is not terminal.
    pub turn: bool,
    /// Winner of the game, `None` while in progress or on a tie
    pub winner: Option<Player>,
    /// Whether the move targeted an occupied cell
    pub cheat: bool,
}

/// Result of [`GameEngine::apply_move`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub board: Board,
    pub terminal: bool,
    pub reward: f64,
    pub info: StepInfo,
}

/// A single game of Tic-Tac-Toe
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    first_player_turn: bool,
    remaining_moves: usize,
    status: GameStatus,
}

impl GameEngine {
    /// Start a new game on an empty board with the first player to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            first_player_turn: true,
            remaining_moves: BOARD_CELLS,
            status: GameStatus::InProgress,
        }
    }

    /// Start a game from an arbitrary position.
    ///
    /// The remaining-move count is the number of empty cells. A position that
    /// already contains a line or has no empty cells starts out terminal.
    pub fn from_board(board: Board, first_player_turn: bool) -> Self {
        let status = if board.has_won(Player::X) {
            GameStatus::Won(Player::X)
        } else if board.has_won(Player::O) {
            GameStatus::Won(Player::O)
        } else if board.empty_count() == 0 {
            GameStatus::Tied
        } else {
            GameStatus::InProgress
        };
        let remaining_moves = if status.is_terminal() {
            0
        } else {
            board.empty_count()
        };

        Self {
            board,
            first_player_turn,
            remaining_moves,
            status,
        }
    }

    /// Snapshot of the board
    pub fn current_board(&self) -> Board {
        self.board
    }

    /// `true` when it is the first player's turn
    pub fn current_turn(&self) -> bool {
        self.first_player_turn
    }

    pub fn current_player(&self) -> Player {
        Player::from_turn(self.first_player_turn)
    }

    pub fn remaining_moves(&self) -> usize {
        self.remaining_moves
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    /// Play `action` (0-8) for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] for an index outside the
    /// board and [`crate::Error::GameOver`] once the game is terminal. An
    /// occupied target cell is *not* an error; see [`GameStatus::CheatedLoss`].
    pub fn apply_move(&mut self, action: usize) -> crate::Result<StepResult> {
        if action >= BOARD_CELLS {
            return Err(crate::Error::InvalidPosition { position: action });
        }
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let mover = self.current_player();
        self.remaining_moves -= 1;

        if !self.board.is_empty(action) {
            let winner = mover.opponent();
            self.remaining_moves = 0;
            self.status = GameStatus::CheatedLoss { winner };
            return Ok(self.step_result(true, LOSS_REWARD, Some(winner), true));
        }

        self.board.place(action, mover.to_cell());

        let (terminal, reward, winner) = if self.board.has_won(mover) {
            self.remaining_moves = 0;
            self.status = GameStatus::Won(mover);
            (true, WIN_REWARD, Some(mover))
        } else if self.remaining_moves == 0 {
            self.status = GameStatus::Tied;
            (true, TIE_REWARD, None)
        } else {
            (false, 0.0, None)
        };

        self.first_player_turn = !self.first_player_turn;
        Ok(self.step_result(terminal, reward, winner, false))
    }

    fn step_result(
        &self,
        terminal: bool,
        reward: f64,
        winner: Option<Player>,
        cheat: bool,
    ) -> StepResult {
        StepResult {
            board: self.board,
            terminal,
            reward,
            info: StepInfo {
                turn: self.first_player_turn,
                winner,
                cheat,
            },
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
