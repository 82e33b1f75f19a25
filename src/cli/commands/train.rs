//! Train command - self-play training of the Q-learning agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    cli::output::{format_number, format_percent, print_kv, print_section},
    pipeline::{Opponent, ProgressObserver, Trainer, TrainingConfig},
    q_learning::QLearningAgent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    /// The agent plays both sides
    #[value(name = "self")]
    SelfPlay,
    /// A uniform-random player moves for O
    Random,
}

impl From<OpponentArg> for Opponent {
    fn from(arg: OpponentArg) -> Self {
        match arg {
            OpponentArg::SelfPlay => Opponent::SelfPlay,
            OpponentArg::Random => Opponent::Random,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent by self-play")]
pub struct TrainArgs {
    /// Number of training episodes (default 100000)
    #[arg(long, short = 'i')]
    pub iterations: Option<usize>,

    /// Learning rate α (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε (0.0-1.0)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Who plays the second player's moves
    #[arg(long, value_enum)]
    pub opponent: Option<OpponentArg>,

    /// Table file to continue from and write to (default qtable.msgpack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// JSON training configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Start from an empty table instead of the one at the output path
    #[arg(long, default_value_t = false)]
    pub fresh: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainArgs {
    /// Resolve the configuration file (if any) with flag overrides applied
    pub fn to_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => TrainingConfig::default(),
        };

        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(opponent) = self.opponent {
            config.opponent = opponent.into();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.to_config()?;

    let mut agent = if args.fresh {
        QLearningAgent::new()
    } else {
        QLearningAgent::from_file(&config.output)
    };
    let starting_states = agent.state_count();

    let mut trainer = Trainer::new(config.clone());
    if !args.no_progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }

    let summary = trainer
        .run(&mut agent)
        .with_context(|| format!("training into {} failed", config.output.display()))?;

    print_section("Training Results");
    print_kv("Episodes", &format_number(summary.episodes));
    print_kv(
        "X wins",
        &format!(
            "{} ({})",
            format_number(summary.first_player_wins),
            format_percent(summary.first_player_wins, summary.episodes)
        ),
    );
    print_kv(
        "O wins",
        &format!(
            "{} ({})",
            format_number(summary.second_player_wins),
            format_percent(summary.second_player_wins, summary.episodes)
        ),
    );
    print_kv(
        "Ties",
        &format!(
            "{} ({})",
            format_number(summary.ties),
            format_percent(summary.ties, summary.episodes)
        ),
    );
    print_kv(
        "States",
        &format!(
            "{} (started with {})",
            format_number(summary.states_learned),
            format_number(starting_states)
        ),
    );
    print_kv("Table", &config.output.display().to_string());

    if let Some(path) = &args.summary {
        summary
            .save(path)
            .with_context(|| format!("failed to write summary {}", path.display()))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
