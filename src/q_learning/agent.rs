//! Tabular Q-learning agent
//!
//! The agent owns the Q-table and the random source used for exploration.
//! It does not know the learning rate or discount factor: the training loop
//! computes new values and hands them to [`QLearningAgent::update`].

use std::path::Path;

use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    adapters::MsgPackRepository,
    ports::{Participant, TableRepository},
    q_learning::q_table::QTable,
    tictactoe::Board,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent over a single table shared by both sides
///
/// The table is keyed purely by board contents, so the same agent can play
/// X and O in self-play without any per-role state.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent with an empty table
    pub fn new() -> Self {
        Self::from_table(QTable::new())
    }

    pub fn from_table(q_table: QTable) -> Self {
        Self {
            q_table,
            rng: build_rng(None),
            rng_seed: None,
        }
    }

    /// Create an agent from a saved table, starting empty if it cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        let mut agent = Self::new();
        agent.load(path);
        agent
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn table(&self) -> &QTable {
        &self.q_table
    }

    pub fn state_count(&self) -> usize {
        self.q_table.state_count()
    }

    /// ε-greedy action selection.
    ///
    /// With probability `exploration_rate`, or when the board has never been
    /// seen, a uniformly random empty cell is returned. Otherwise the legal
    /// action with the highest stored value wins; ties go to the lowest cell
    /// index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the board has no empty cells.
    pub fn choose_action(&mut self, board: &Board, exploration_rate: f64) -> Result<usize> {
        let explore = self.rng.random::<f64>() < exploration_rate;
        let key = board.state_key();
        if explore || !self.q_table.contains(&key) {
            return self.random_action(board);
        }

        let legal = board.empty_cells();
        match self.q_table.greedy_action(&key, &legal) {
            Some(action) => Ok(action),
            None => self.random_action(board),
        }
    }

    /// Uniformly random empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the board has no empty cells.
    pub fn random_action(&mut self, board: &Board) -> Result<usize> {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::InvalidState {
                state: board.state_key().into_string(),
            })
    }

    /// Stored estimate for `(board, action)`, 0.0 if never stored
    pub fn value_of(&self, board: &Board, action: usize) -> f64 {
        self.q_table.get(&board.state_key(), action)
    }

    /// Maximum stored value for the board, 0.0 if the board is unseen
    pub fn best_value(&self, board: &Board) -> f64 {
        self.q_table.max_value(&board.state_key())
    }

    /// Write `new_value` for `(board, action)`.
    ///
    /// The first write for a board seeds every empty cell at 0.0 before
    /// overwriting the target. An action that is not an empty cell of
    /// `board` indicates the caller acted on a stale board; it is logged
    /// and the value is still written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the board has no empty cells, since
    /// terminal boards are never keyed.
    pub fn update(&mut self, new_value: f64, board: &Board, action: usize) -> Result<()> {
        let legal = board.empty_cells();
        if legal.is_empty() {
            return Err(Error::InvalidState {
                state: board.state_key().into_string(),
            });
        }
        if !legal.contains(&action) {
            warn!(
                "update for action {action} which is not legal on board {} (value {new_value})",
                board.state_key()
            );
        }

        let key = board.state_key();
        self.q_table.seed_state(&key, &legal);
        if !self.q_table.set(key, action, new_value) {
            debug!("action {action} was not seeded for board {}", board.state_key());
        }
        Ok(())
    }

    /// Persist the whole table to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        MsgPackRepository::new().save(&self.q_table, path.as_ref())
    }

    /// Replace the table with the one stored at `path`.
    ///
    /// A missing or unreadable file leaves the agent with an empty table and
    /// logs a warning. Returns whether a table was loaded.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        match MsgPackRepository::new().load(path) {
            Ok(table) => {
                debug!(
                    "loaded Q-table with {} states from {}",
                    table.state_count(),
                    path.display()
                );
                self.q_table = table;
                true
            }
            Err(e) => {
                warn!("starting with an empty Q-table: {e}");
                self.q_table = QTable::new();
                false
            }
        }
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Participant for QLearningAgent {
    fn choose_action(&mut self, board: &Board) -> Result<usize> {
        QLearningAgent::choose_action(self, board, 0.0)
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }
}
