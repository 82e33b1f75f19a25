//! Live games between two participants

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Participant, Renderer},
    tictactoe::{Board, GameEngine, GameStatus, Player},
};

/// Outcome of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub status: GameStatus,
    /// Actions in the order they were played, including a final cheat move
    pub moves: Vec<usize>,
    pub final_board: Board,
}

impl GameReport {
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn cheated(&self) -> bool {
        matches!(self.status, GameStatus::CheatedLoss { .. })
    }

    pub fn is_tie(&self) -> bool {
        self.status == GameStatus::Tied
    }
}

/// Play one game from the empty board; `first` moves as X.
///
/// Each participant is asked exactly once per turn and its answer is
/// final. The renderer, if any, is shown the board before the first move
/// and after every move; its errors are logged and otherwise ignored.
///
/// # Errors
///
/// Propagates a participant's error (e.g. a closed input stream) and
/// [`crate::Error::InvalidPosition`] for an action outside 0-8.
pub fn play_game(
    first: &mut dyn Participant,
    second: &mut dyn Participant,
    mut renderer: Option<&mut dyn Renderer>,
) -> Result<GameReport> {
    let mut engine = GameEngine::new();
    let mut board = engine.current_board();
    let mut turn = engine.current_turn();
    let mut moves = Vec::new();

    if let Some(r) = renderer.as_deref_mut() {
        render(r, &board, turn);
    }

    loop {
        let participant: &mut dyn Participant = if turn { &mut *first } else { &mut *second };
        let action = participant.choose_action(&board)?;
        debug!("{} plays {action}", participant.name());

        let step = engine.apply_move(action)?;
        moves.push(action);
        board = step.board;
        turn = step.info.turn;

        if step.terminal {
            if let Some(r) = renderer.as_deref_mut() {
                if let Err(e) = r.render_final(&board) {
                    warn!("renderer failed: {e}");
                }
            }
            return Ok(GameReport {
                status: engine.status(),
                moves,
                final_board: board,
            });
        }

        if let Some(r) = renderer.as_deref_mut() {
            render(r, &board, turn);
        }
    }
}

fn render(renderer: &mut dyn Renderer, board: &Board, turn: bool) {
    if let Err(e) = renderer.render(board, turn) {
        warn!("renderer failed: {e}");
    }
}

/// Tally of a series of games, seen from the first participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub ties: usize,
    pub cheats: usize,
}

impl SeriesResult {
    pub fn record(&mut self, report: &GameReport) {
        self.games += 1;
        match report.winner() {
            Some(Player::X) => self.first_wins += 1,
            Some(Player::O) => self.second_wins += 1,
            None => self.ties += 1,
        }
        if report.cheated() {
            self.cheats += 1;
        }
    }
}

/// Play `games` games with the same seating and no rendering
pub fn play_series(
    first: &mut dyn Participant,
    second: &mut dyn Participant,
    games: usize,
) -> Result<SeriesResult> {
    let mut result = SeriesResult::default();
    for _ in 0..games {
        let report = play_game(first, second, None)?;
        result.record(&report);
    }
    Ok(result)
}
