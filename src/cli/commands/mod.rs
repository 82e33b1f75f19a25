//! Subcommands of the `qttt` binary

pub mod evaluate;
pub mod play;
pub mod train;
