//! Step visitation state

use crate::core::step::StepId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visitation state of a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    /// Step has not been completed (or was reset)
    Unvisited,
    /// Step was completed
    Visited {
        visited_at: DateTime<Utc>,
    },
}

impl StepState {
    pub fn is_visited(&self) -> bool {
        matches!(self, StepState::Visited { .. })
    }
}

impl Default for StepState {
    fn default() -> Self {
        StepState::Unvisited
    }
}

/// Maps steps to their visitation state
///
/// Steps without an entry are unvisited.
#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    states: HashMap<StepId, StepState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of a step
    pub fn state(&self, step: StepId) -> StepState {
        self.states.get(&step).cloned().unwrap_or_default()
    }

    pub fn is_visited(&self, step: StepId) -> bool {
        self.states.get(&step).is_some_and(StepState::is_visited)
    }

    /// Mark a step as visited. A step that is already visited keeps its timestamp.
    pub fn set_visited(&mut self, step: StepId) {
        let entry = self.states.entry(step).or_default();
        if !entry.is_visited() {
            *entry = StepState::Visited {
                visited_at: Utc::now(),
            };
        }
    }

    /// Mark a step as unvisited
    pub fn set_unvisited(&mut self, step: StepId) {
        self.states.insert(step, StepState::Unvisited);
    }

    /// Drop the entry of a step
    pub fn remove(&mut self, step: StepId) -> Option<StepState> {
        self.states.remove(&step)
    }

    /// Number of steps with an entry
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, step: StepId) -> bool {
        self.states.contains_key(&step)
    }
}
