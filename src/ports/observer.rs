//! Observer port - abstraction for training observation
//!
//! This port lets progress reporting and metrics collection hook into the
//! training loop without coupling it to a terminal or an output format.

use crate::{Result, pipeline::TrainingSummary, tictactoe::GameStatus};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, status)` - after every finished episode
/// 3. `on_training_end(summary)` - once at the end, also after a cancelled run
///
/// # Examples
///
/// ```no_run
/// use qttt::{ports::TrainingObserver, tictactoe::GameStatus};
///
/// struct TieCounter {
///     ties: usize,
/// }
///
/// impl TrainingObserver for TieCounter {
///     fn on_episode_end(&mut self, _episode: usize, status: GameStatus) -> qttt::Result<()> {
///         if status == GameStatus::Tied {
///             self.ties += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait TrainingObserver {
    /// Called when training starts with the number of planned episodes.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each episode reaches a terminal state.
    ///
    /// `episode` is 0-based.
    fn on_episode_end(&mut self, _episode: usize, _status: GameStatus) -> Result<()> {
        Ok(())
    }

    /// Called when training completes or is cancelled, with the final
    /// summary (including `states_learned`) before the table is written.
    fn on_training_end(&mut self, _summary: &TrainingSummary) -> Result<()> {
        Ok(())
    }
}
