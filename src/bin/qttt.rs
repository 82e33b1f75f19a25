//! qttt CLI - train and play a tabular Q-learning tic-tac-toe agent
//!
//! - `train`: self-play training, written to a MessagePack table
//! - `play`: live games between people and the trained agent
//! - `evaluate`: greedy agent against a uniform-random player
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-move output.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qttt")]
#[command(version, about = "Tabular Q-learning for tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent by self-play
    Train(qttt::cli::commands::train::TrainArgs),

    /// Play on the console against people or the agent
    Play(qttt::cli::commands::play::PlayArgs),

    /// Evaluate a trained table against a random player
    Evaluate(qttt::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qttt::cli::commands::train::execute(args),
        Commands::Play(args) => qttt::cli::commands::play::execute(args),
        Commands::Evaluate(args) => qttt::cli::commands::evaluate::execute(args),
    }
}
