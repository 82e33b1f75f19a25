//! Play command - live games on the console

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    adapters::{ConsoleHuman, ConsoleRenderer},
    pipeline::{DEFAULT_TABLE_PATH, GameReport, play_game},
    ports::Participant,
    q_learning::QLearningAgent,
    tictactoe::Player,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayMode {
    /// Two people share the console
    HumanVsHuman,
    /// A person plays X against the agent
    HumanVsAgent,
    /// The agent plays X against a person
    AgentVsHuman,
    /// The agent plays both sides
    AgentVsAgent,
}

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe on the console")]
pub struct PlayArgs {
    /// Who plays X and who plays O
    #[arg(long, short = 'm', value_enum, default_value = "human-vs-agent")]
    pub mode: PlayMode,

    /// Trained table used by the agent
    #[arg(long, short = 't', default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,
}

fn human(name: &str) -> Box<dyn Participant> {
    Box::new(ConsoleHuman::new(name, io::stdin(), io::stdout()))
}

fn agent(args: &PlayArgs) -> Box<dyn Participant> {
    Box::new(QLearningAgent::from_file(&args.table))
}

/// Announcement printed when a game ends
pub fn outcome_message(report: &GameReport) -> String {
    match report.winner() {
        Some(Player::X) => "X WINNER!".to_string(),
        Some(Player::O) => "O WINNER!".to_string(),
        None => "TIE!".to_string(),
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (mut first, mut second) = match args.mode {
        PlayMode::HumanVsHuman => (human("Player X"), human("Player O")),
        PlayMode::HumanVsAgent => (human("Player X"), agent(&args)),
        PlayMode::AgentVsHuman => (agent(&args), human("Player O")),
        PlayMode::AgentVsAgent => (agent(&args), agent(&args)),
    };

    let mut renderer = ConsoleRenderer::new(io::stdout());
    for game in 0..args.games {
        if args.games > 1 {
            println!("\nGame {} of {}", game + 1, args.games);
        }
        let report = play_game(first.as_mut(), second.as_mut(), Some(&mut renderer))
            .context("game aborted")?;
        if report.cheated() {
            println!("Illegal move on an occupied cell.");
        }
        println!("{}", outcome_message(&report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::ScriptedParticipant,
        tictactoe::{Board, GameStatus},
    };

    fn report(status: GameStatus) -> GameReport {
        GameReport {
            status,
            moves: Vec::new(),
            final_board: Board::new(),
        }
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(outcome_message(&report(GameStatus::Won(Player::X))), "X WINNER!");
        assert_eq!(
            outcome_message(&report(GameStatus::CheatedLoss { winner: Player::O })),
            "O WINNER!"
        );
        assert_eq!(outcome_message(&report(GameStatus::Tied)), "TIE!");
    }

    #[test]
    fn test_scripted_game_message() {
        let mut x = ScriptedParticipant::new("X", vec![0, 1, 2]);
        let mut o = ScriptedParticipant::new("O", vec![3, 4]);
        let report = play_game(&mut x, &mut o, None).unwrap();
        assert_eq!(outcome_message(&report), "X WINNER!");
    }
}
