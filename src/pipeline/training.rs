//! Self-play training loop

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::TrainingObserver,
    q_learning::{QLearningAgent, TdParams},
    tictactoe::{Board, GameEngine, GameStatus, Player},
};

/// Default location of the persisted Q-table
pub const DEFAULT_TABLE_PATH: &str = "qtable.msgpack";

/// Who plays the second player's moves during training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    /// The agent plays both sides
    #[default]
    SelfPlay,
    /// A uniform-random player moves for O
    Random,
}

/// Training configuration
///
/// Every field has a default, so a JSON config file only needs the options
/// it wants to change:
///
/// ```
/// use qttt::pipeline::TrainingConfig;
///
/// let config: TrainingConfig = serde_json::from_str(r#"{ "iterations": 500, "epsilon": 0.1 }"#)?;
/// assert_eq!(config.iterations, 500);
/// assert_eq!(config.alpha, 0.5);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub iterations: usize,

    /// Learning rate α
    pub alpha: f64,

    /// Discount factor γ
    pub gamma: f64,

    /// Exploration rate ε for every move after the forced-random opening
    pub epsilon: f64,

    /// Random seed
    pub seed: Option<u64>,

    /// Source of the second player's moves
    pub opponent: Opponent,

    /// Where the table is written when training ends
    pub output: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.25,
            seed: None,
            opponent: Opponent::SelfPlay,
            output: PathBuf::from(DEFAULT_TABLE_PATH),
        }
    }
}

impl TrainingConfig {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_opponent(mut self, opponent: Opponent) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn td_params(&self) -> TdParams {
        TdParams::new(self.alpha, self.gamma)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open config {:?}", path.as_ref()),
            source,
        })?;
        let config: TrainingConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that α, γ and ε are probabilities
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Episodes actually played
    pub episodes: usize,
    pub first_player_wins: usize,
    pub second_player_wins: usize,
    pub ties: usize,
    /// States stored in the table after training
    pub states_learned: usize,
    /// Whether the run stopped early on request
    pub cancelled: bool,
}

impl TrainingSummary {
    pub fn tie_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.ties as f64 / self.episodes as f64
        }
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Move source for one side of a training episode
enum SecondSeat {
    Agent,
    Random(StdRng),
}

impl SecondSeat {
    fn for_config(config: &TrainingConfig) -> Self {
        match config.opponent {
            Opponent::SelfPlay => SecondSeat::Agent,
            Opponent::Random => SecondSeat::Random(match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                None => StdRng::from_rng(&mut rand::rng()),
            }),
        }
    }

    fn choose(
        &mut self,
        agent: &mut QLearningAgent,
        board: &Board,
        player: Player,
        epsilon: f64,
    ) -> Result<usize> {
        match (self, player) {
            (SecondSeat::Random(rng), Player::O) => {
                board
                    .empty_cells()
                    .choose(rng)
                    .copied()
                    .ok_or_else(|| Error::InvalidState {
                        state: board.state_key().into_string(),
                    })
            }
            _ => agent.choose_action(board, epsilon),
        }
    }
}

/// Self-play trainer for a [`QLearningAgent`]
pub struct Trainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            cancel: None,
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Stop between episodes once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Play the configured number of episodes, then persist the table once.
    ///
    /// A cancelled run still writes the table learned so far.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingSummary> {
        self.config.validate()?;
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        let params = self.config.td_params();
        let mut second_seat = SecondSeat::for_config(&self.config);
        let mut summary = TrainingSummary {
            episodes: 0,
            first_player_wins: 0,
            second_player_wins: 0,
            ties: 0,
            states_learned: 0,
            cancelled: false,
        };

        info!(
            "training for {} episodes (alpha={}, gamma={}, epsilon={}, opponent={:?})",
            self.config.iterations,
            self.config.alpha,
            self.config.gamma,
            self.config.epsilon,
            self.config.opponent
        );

        for observer in &mut self.observers {
            observer.on_training_start(self.config.iterations)?;
        }

        for episode in 0..self.config.iterations {
            if self.is_cancelled() {
                warn!("training cancelled after {episode} episodes");
                summary.cancelled = true;
                break;
            }

            let status = run_episode(
                agent,
                params,
                self.config.epsilon,
                &mut second_seat,
            )?;

            match status.winner() {
                Some(Player::X) => summary.first_player_wins += 1,
                Some(Player::O) => summary.second_player_wins += 1,
                None => summary.ties += 1,
            }
            summary.episodes += 1;

            for observer in &mut self.observers {
                observer.on_episode_end(episode, status)?;
            }
        }

        summary.states_learned = agent.state_count();
        for observer in &mut self.observers {
            observer.on_training_end(&summary)?;
        }

        agent.save(&self.config.output)?;
        info!(
            "training finished: {} episodes, {} states written to {}",
            summary.episodes,
            summary.states_learned,
            self.config.output.display()
        );

        Ok(summary)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Play one self-play episode, updating `agent` after every transition.
///
/// The opening move is always random. Each later move updates the previous
/// mover's `(state, action)` toward the new reward plus the discounted best
/// value of the resulting board. On the terminal move the mover's own pair is
/// updated toward the terminal reward, and the previous mover's pair toward
/// the same reward, negated when the game had a winner.
pub fn play_episode(
    agent: &mut QLearningAgent,
    params: TdParams,
    epsilon: f64,
) -> Result<GameStatus> {
    run_episode(agent, params, epsilon, &mut SecondSeat::Agent)
}

fn run_episode(
    agent: &mut QLearningAgent,
    params: TdParams,
    epsilon: f64,
    second_seat: &mut SecondSeat,
) -> Result<GameStatus> {
    let mut engine = GameEngine::new();

    let mut state = engine.current_board();
    let mut action = agent.random_action(&state)?;
    let mut next_state = engine.apply_move(action)?.board;

    loop {
        let mover = engine.current_player();
        let next_action = second_seat.choose(agent, &next_state, mover, epsilon)?;
        let step = engine.apply_move(next_action)?;

        if step.terminal {
            let value = params.terminal(agent.value_of(&next_state, next_action), step.reward);
            agent.update(value, &next_state, next_action)?;

            let reward = if step.info.winner.is_some() {
                -step.reward
            } else {
                step.reward
            };
            let value = params.terminal(agent.value_of(&state, action), reward);
            agent.update(value, &state, action)?;

            debug!("episode ended {:?} on board {}", engine.status(), step.board.state_key());
            return Ok(engine.status());
        }

        let value = params.step(
            agent.value_of(&state, action),
            step.reward,
            agent.best_value(&step.board),
        );
        agent.update(value, &state, action)?;

        state = next_state;
        next_state = step.board;
        action = next_action;
    }
}

/// Train with default hyperparameters for `iterations` episodes.
///
/// Continues from the table at [`DEFAULT_TABLE_PATH`] if one exists and
/// writes the result back there.
pub fn train(iterations: usize) -> Result<TrainingSummary> {
    let config = TrainingConfig::new(iterations);
    let mut agent = QLearningAgent::from_file(&config.output);
    Trainer::new(config).run(&mut agent)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_matches_documented_values() {
        let config = TrainingConfig::default();
        assert_eq!(config.iterations, 100_000);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon, 0.25);
        assert_eq!(config.opponent, Opponent::SelfPlay);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(TrainingConfig::new(1).with_alpha(1.5).validate().is_err());
        assert!(TrainingConfig::new(1).with_epsilon(-0.1).validate().is_err());
        assert!(TrainingConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_episode_never_keys_terminal_boards() {
        let mut agent = QLearningAgent::new().with_seed(42);
        for _ in 0..200 {
            play_episode(&mut agent, TdParams::default(), 0.25).unwrap();
        }
        assert!(agent.state_count() > 0);
        for (_, actions) in agent.table().iter() {
            assert!(!actions.is_empty());
        }
    }

    #[test]
    fn test_random_opponent_plays_second_seat() {
        let tmp = TempDir::new().unwrap();
        let config = TrainingConfig::new(50)
            .with_seed(9)
            .with_opponent(Opponent::Random)
            .with_output(tmp.path().join("t.msgpack"));
        let mut agent = QLearningAgent::new();
        let summary = Trainer::new(config).run(&mut agent).unwrap();

        assert_eq!(summary.episodes, 50);
        assert_eq!(
            summary.first_player_wins + summary.second_player_wins + summary.ties,
            50
        );
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("summary.json");
        let summary = TrainingSummary {
            episodes: 10,
            first_player_wins: 4,
            second_player_wins: 3,
            ties: 3,
            states_learned: 120,
            cancelled: false,
        };
        summary.save(&path).unwrap();
        assert_eq!(TrainingSummary::load(&path).unwrap(), summary);
        assert!((summary.tie_rate() - 0.3).abs() < 1e-12);
    }
}
