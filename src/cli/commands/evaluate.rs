//! Evaluate command - greedy agent against a uniform-random player

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use crate::{
    adapters::RandomParticipant,
    cli::output::{format_number, format_percent, print_kv, print_section},
    pipeline::{DEFAULT_TABLE_PATH, SeriesResult, play_series},
    q_learning::QLearningAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained table against a random player")]
pub struct EvaluateArgs {
    /// Trained table to evaluate
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Number of games per seating
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Random seed for the opponent
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Results with the agent moving first and second
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub as_x: SeriesResult,
    pub as_o: SeriesResult,
}

/// Play `args.games` games in each seating
pub fn evaluate(args: &EvaluateArgs) -> Result<Evaluation> {
    let mut agent = QLearningAgent::from_file(&args.table);
    if agent.state_count() == 0 {
        bail!("no trained table at {}", args.table.display());
    }
    info!(
        "evaluating {} states from {}",
        agent.state_count(),
        args.table.display()
    );

    let mut random = match args.seed {
        Some(seed) => RandomParticipant::with_seed("Random", seed),
        None => RandomParticipant::new("Random"),
    };

    let as_x = play_series(&mut agent, &mut random, args.games)?;
    let as_o = play_series(&mut random, &mut agent, args.games)?;
    Ok(Evaluation { as_x, as_o })
}

fn print_series(title: &str, wins: usize, losses: usize, result: &SeriesResult) {
    print_section(title);
    print_kv("Games", &format_number(result.games));
    print_kv(
        "Wins",
        &format!("{} ({})", wins, format_percent(wins, result.games)),
    );
    print_kv(
        "Losses",
        &format!("{} ({})", losses, format_percent(losses, result.games)),
    );
    print_kv(
        "Ties",
        &format!("{} ({})", result.ties, format_percent(result.ties, result.games)),
    );
    print_kv("Cheats", &result.cheats.to_string());
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let evaluation = evaluate(&args)?;
    let (x, o) = (evaluation.as_x, evaluation.as_o);
    print_series("Agent as X", x.first_wins, x.second_wins, &x);
    print_series("Agent as O", o.second_wins, o.first_wins, &o);
    Ok(())
}
