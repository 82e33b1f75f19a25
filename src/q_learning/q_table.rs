//! Sparse Q-table keyed by board contents

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Q-table mapping states to per-action value estimates
///
/// Each seen state owns a map from legal action (0-8) to value. The action
/// map is ordered by action index, which fixes the tie-break used by
/// [`QTable::greedy_action`]: the lowest action holding the maximum value
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    states: HashMap<StateKey, BTreeMap<usize, f64>>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, state: &StateKey) -> bool {
        self.states.contains_key(state)
    }

    /// Action values recorded for a state, if it has been seen
    pub fn actions(&self, state: &StateKey) -> Option<&BTreeMap<usize, f64>> {
        self.states.get(state)
    }

    /// Get Q-value for a state-action pair, 0.0 when never stored
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.states
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Maximum stored value for a state, 0.0 when the state is unseen
    pub fn max_value(&self, state: &StateKey) -> f64 {
        self.states
            .get(state)
            .and_then(|actions| Self::first_max(actions.iter().map(|(&a, &v)| (a, v))))
            .map(|(_, value)| value)
            .unwrap_or(0.0)
    }

    /// Highest-valued action among `allowed` for a seen state.
    ///
    /// Returns `None` when the state is unseen or none of its recorded actions
    /// are allowed. Ties go to the lowest action index.
    pub fn greedy_action(&self, state: &StateKey, allowed: &[usize]) -> Option<usize> {
        let actions = self.states.get(state)?;
        Self::first_max(
            actions
                .iter()
                .filter(|(action, _)| allowed.contains(action))
                .map(|(&a, &v)| (a, v)),
        )
        .map(|(action, _)| action)
    }

    /// Insert a state with every legal action valued 0.0.
    ///
    /// Returns `true` if the state was newly inserted. Existing states and
    /// empty action lists are left untouched.
    pub fn seed_state(&mut self, state: &StateKey, legal_actions: &[usize]) -> bool {
        if legal_actions.is_empty() || self.states.contains_key(state) {
            return false;
        }
        let actions = legal_actions.iter().map(|&a| (a, 0.0)).collect();
        self.states.insert(state.clone(), actions);
        true
    }

    /// Set Q-value for a state-action pair.
    ///
    /// Returns `false` when the action was not already present under the
    /// state (the value is written regardless).
    pub fn set(&mut self, state: StateKey, action: usize, value: f64) -> bool {
        self.states
            .entry(state)
            .or_default()
            .insert(action, value)
            .is_some()
    }

    /// Number of states stored
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of state-action values stored
    pub fn size(&self) -> usize {
        self.states.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &BTreeMap<usize, f64>)> {
        self.states.iter()
    }

    fn first_max(values: impl Iterator<Item = (usize, f64)>) -> Option<(usize, f64)> {
        values.fold(None, |best, (action, value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((action, value)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_unseen_state_is_zero() {
        let table = QTable::new();
        let state = key("000000000");
        assert_eq!(table.get(&state, 0), 0.0);
        assert_eq!(table.max_value(&state), 0.0);
        assert_eq!(table.greedy_action(&state, &[0, 1]), None);
    }

    #[test]
    fn test_seed_state_initializes_legal_actions() {
        let mut table = QTable::new();
        let state = key("120000000");
        assert!(table.seed_state(&state, &[2, 3, 4]));
        assert!(!table.seed_state(&state, &[5]));

        let actions = table.actions(&state).unwrap();
        assert_eq!(actions.keys().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(actions.values().all(|&v| v == 0.0));
    }

    #[test]
    fn test_seed_state_skips_states_without_actions() {
        let mut table = QTable::new();
        assert!(!table.seed_state(&key("121121212"), &[]));
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_get() {
        let mut table = QTable::new();
        let state = key("000000000");
        table.seed_state(&state, &[0, 1, 2]);
        assert!(table.set(state.clone(), 1, 1.5));
        assert_eq!(table.get(&state, 1), 1.5);
        assert!(!table.set(state.clone(), 7, 0.5));
        assert_eq!(table.size(), 4);
    }

    #[test]
    fn test_max_value_and_greedy_action() {
        let mut table = QTable::new();
        let state = key("000000000");
        table.set(state.clone(), 0, 0.5);
        table.set(state.clone(), 1, 1.5);
        table.set(state.clone(), 2, 0.8);

        assert_eq!(table.max_value(&state), 1.5);
        assert_eq!(table.greedy_action(&state, &[0, 1, 2]), Some(1));
        assert_eq!(table.greedy_action(&state, &[0, 2]), Some(2));
    }

    #[test]
    fn test_max_value_can_be_negative() {
        let mut table = QTable::new();
        let state = key("000000000");
        table.set(state.clone(), 3, -4.0);
        table.set(state.clone(), 5, -1.0);
        assert_eq!(table.max_value(&state), -1.0);
    }

    #[test]
    fn test_greedy_ties_go_to_lowest_action() {
        let mut table = QTable::new();
        let state = key("000000000");
        for action in [8, 3, 5] {
            table.set(state.clone(), action, 2.0);
        }
        assert_eq!(table.greedy_action(&state, &[3, 5, 8]), Some(3));
    }
}
