//! Tic-Tac-Toe board and rules engine

pub mod board;
pub mod engine;
pub mod lines;

pub use board::{BOARD_CELLS, Board, Cell, Player};
pub use engine::{
    GameEngine, GameStatus, LOSS_REWARD, StepInfo, StepResult, TIE_REWARD, WIN_REWARD,
};
pub use lines::{LineAnalyzer, LineKind, WINNING_LINES};
