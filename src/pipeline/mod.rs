//! Training and play pipelines
//!
//! This module provides:
//! - The self-play training loop for the Q-learning agent
//! - A driver for live games between any two participants
//! - Observers that report training progress

pub mod driver;
pub mod observers;
pub mod training;

pub use driver::{GameReport, SeriesResult, play_game, play_series};
pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{
    DEFAULT_TABLE_PATH, Opponent, Trainer, TrainingConfig, TrainingSummary, play_episode, train,
};

pub use crate::ports::{Participant, TrainingObserver};
