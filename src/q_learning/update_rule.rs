//! One-step temporal-difference update

use serde::{Deserialize, Serialize};

/// Learning rate α and discount factor γ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdParams {
    pub alpha: f64,
    pub gamma: f64,
}

impl TdParams {
    pub fn new(alpha: f64, gamma: f64) -> Self {
        Self { alpha, gamma }
    }

    /// New estimate after a non-terminal transition
    ///
    /// Q(s,a) ← (1-α)·Q(s,a) + α·(r + γ·best(s'))
    pub fn step(&self, current: f64, reward: f64, next_best: f64) -> f64 {
        td_target(self.alpha, current, reward + self.gamma * next_best)
    }

    /// New estimate after a terminal transition
    ///
    /// Q(s,a) ← (1-α)·Q(s,a) + α·r
    pub fn terminal(&self, current: f64, reward: f64) -> f64 {
        td_target(self.alpha, current, reward)
    }
}

impl Default for TdParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
        }
    }
}

/// Blend `current` toward `target` by `alpha`
pub fn td_target(alpha: f64, current: f64, target: f64) -> f64 {
    (1.0 - alpha) * current + alpha * target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bootstraps_from_next_state() {
        let params = TdParams::new(0.5, 0.9);
        // 0.5·1.0 + 0.5·(0 + 0.9·4.0) = 2.3
        assert!((params.step(1.0, 0.0, 4.0) - 2.3).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_ignores_discount() {
        let params = TdParams::new(0.5, 0.9);
        assert_eq!(params.terminal(0.0, 10.0), 5.0);
        assert_eq!(params.terminal(4.0, -10.0), -3.0);
    }

    #[test]
    fn test_alpha_one_replaces_value() {
        let params = TdParams::new(1.0, 0.0);
        assert_eq!(params.step(123.0, 2.0, 50.0), 2.0);
    }
}
