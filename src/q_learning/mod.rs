//! Tabular Q-learning
//!
//! The agent keeps one table of action values per board and learns it by
//! playing both sides of a game against itself. The temporal-difference
//! rule lives in [`update_rule`] and is applied by the training loop:
//!
//! | Transition | New value |
//! |------------|-----------|
//! | non-terminal | `(1-α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))` |
//! | terminal | `(1-α)·Q(s,a) + α·r` |
//!
//! ## Usage Example
//!
//! ```no_run
//! use qttt::q_learning::QLearningAgent;
//! use qttt::tictactoe::GameEngine;
//!
//! let mut agent = QLearningAgent::from_file("qtable.msgpack");
//! let engine = GameEngine::new();
//! let action = agent.choose_action(&engine.current_board(), 0.0)?;
//! # Ok::<(), qttt::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;
pub mod update_rule;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::SavedQTable;
pub use update_rule::{TdParams, td_target};
