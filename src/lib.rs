//! Tabular Q-learning for tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe engine with reward signals and an illegal-move rule
//! - A Q-learning agent with an ε-greedy policy and a persisted Q-table
//! - A self-play training loop with observers and cancellation
//! - A driver for live games between people and the agent

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use pipeline::{GameReport, Trainer, TrainingConfig, TrainingSummary, play_game, train};
pub use q_learning::{QLearningAgent, QTable};
pub use tictactoe::{Board, GameEngine, GameStatus, Player};
pub use types::StateKey;
