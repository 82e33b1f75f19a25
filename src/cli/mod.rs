//! CLI infrastructure for the qttt binary
//!
//! This module provides the command-line interface for training the agent,
//! playing live games against it and measuring it against a random player.

pub mod commands;
pub mod output;
