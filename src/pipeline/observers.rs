//! Observer implementations for training

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    pipeline::TrainingSummary,
    ports::TrainingObserver,
    tictactoe::{GameStatus, Player},
};

/// Progress bar observer (indicatif)
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} T:{}", self.x_wins, self.o_wins, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, status: GameStatus) -> Result<()> {
        match status.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.ties += 1,
        }

        // Redraw every 100 episodes
        if (episode + 1).is_multiple_of(100) {
            if let Some(pb) = &self.progress_bar {
                pb.set_position(episode as u64 + 1);
                pb.set_message(self.message());
            }
        }
        Ok(())
    }

    fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episodes as u64);
            pb.finish_with_message(format!(
                "{}, {} states",
                self.message(),
                summary.states_learned
            ));
        }
        Ok(())
    }
}

/// Metrics observer - counts episode outcomes
///
/// A cheat loss counts as a win for the other player, as in
/// [`TrainingSummary`]; `cheats` additionally tallies how many wins came
/// that way.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    pub episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub cheats: usize,
    /// Table size reported when training ended
    pub states_learned: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of episodes that ended in a tie
    pub fn tie_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.ties as f64 / self.episodes as f64
        }
    }
}

impl TrainingObserver for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, status: GameStatus) -> Result<()> {
        self.episodes += 1;
        match status.winner() {
            Some(Player::X) => self.x_wins += 1,
            Some(Player::O) => self.o_wins += 1,
            None => self.ties += 1,
        }
        if matches!(status, GameStatus::CheatedLoss { .. }) {
            self.cheats += 1;
        }
        Ok(())
    }

    fn on_training_end(&mut self, summary: &TrainingSummary) -> Result<()> {
        self.states_learned = summary.states_learned;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer_counts_outcomes() {
        let mut observer = MetricsObserver::new();
        observer.on_episode_end(0, GameStatus::Won(Player::X)).unwrap();
        observer.on_episode_end(1, GameStatus::Tied).unwrap();
        observer.on_episode_end(2, GameStatus::Tied).unwrap();
        observer
            .on_episode_end(3, GameStatus::CheatedLoss { winner: Player::O })
            .unwrap();

        assert_eq!(observer.episodes, 4);
        assert_eq!(observer.x_wins, 1);
        assert_eq!(observer.o_wins, 1);
        assert_eq!(observer.ties, 2);
        assert_eq!(observer.cheats, 1);
        assert_eq!(observer.tie_rate(), 0.5);
    }

    #[test]
    fn test_metrics_agree_with_summary_on_cheats() {
        let outcomes = [
            GameStatus::CheatedLoss { winner: Player::X },
            GameStatus::CheatedLoss { winner: Player::O },
            GameStatus::Won(Player::O),
        ];
        let mut observer = MetricsObserver::new();
        for (i, status) in outcomes.into_iter().enumerate() {
            observer.on_episode_end(i, status).unwrap();
        }

        assert_eq!(observer.x_wins, 1);
        assert_eq!(observer.o_wins, 2);
        assert_eq!(observer.ties, 0);
        assert_eq!(observer.cheats, 2);
        assert_eq!(observer.x_wins + observer.o_wins + observer.ties, observer.episodes);
    }

    #[test]
    fn test_metrics_record_final_table_size() {
        let mut observer = MetricsObserver::new();
        let summary = TrainingSummary {
            episodes: 3,
            first_player_wins: 1,
            second_player_wins: 1,
            ties: 1,
            states_learned: 42,
            cancelled: false,
        };
        observer.on_training_end(&summary).unwrap();
        assert_eq!(observer.states_learned, 42);
    }
}
