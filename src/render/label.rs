//! Step labels - caption and icon of each step in the step bar

use crate::core::{StepEvent, StepId, StepIterator, Transition, Step};
use crate::render::Theme;
use console::style;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which state icons a label may show instead of its number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelIconStrategy {
    /// Completed, skipped and editable steps get their own icons
    #[default]
    Default,
    /// Every label shows its position
    NumbersOnly,
}

impl LabelIconStrategy {
    pub fn allow_nexted(&self) -> bool {
        matches!(self, LabelIconStrategy::Default)
    }

    pub fn allow_skipped(&self) -> bool {
        matches!(self, LabelIconStrategy::Default)
    }

    pub fn allow_editable(&self) -> bool {
        matches!(self, LabelIconStrategy::Default)
    }
}

/// Icon shown in front of a step caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelIcon {
    /// 1-based position in the sequence
    Number(usize),
    Complete,
    Skipped,
    Editable,
    Error,
}

impl LabelIcon {
    pub fn symbol(&self, theme: &Theme) -> String {
        match self {
            LabelIcon::Number(n) => format!("({})", n),
            LabelIcon::Complete => theme.complete_icon.clone(),
            LabelIcon::Skipped => theme.skipped_icon.clone(),
            LabelIcon::Editable => theme.editable_icon.clone(),
            LabelIcon::Error => theme.error_icon.clone(),
        }
    }
}

/// Label of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLabel {
    /// 1-based position
    pub number: usize,
    pub caption: String,
    pub description: Option<String>,
    pub icon: LabelIcon,
    pub active: bool,
    pub disabled: bool,
    pub error: Option<String>,
}

impl StepLabel {
    /// Icon and caption without styling
    pub fn plain(&self, theme: &Theme) -> String {
        format!("{} {}", self.icon.symbol(theme), self.caption)
    }

    /// Icon and caption styled for the terminal
    pub fn styled(&self, theme: &Theme) -> String {
        let text = self.plain(theme);
        if self.error.is_some() {
            style(text).red().to_string()
        } else if self.active {
            style(text).bold().cyan().to_string()
        } else if self.disabled {
            style(text).dim().to_string()
        } else {
            match self.icon {
                LabelIcon::Complete | LabelIcon::Editable => style(text).green().to_string(),
                LabelIcon::Skipped => style(text).yellow().to_string(),
                _ => text,
            }
        }
    }
}

/// Computes step labels from the iterator state
///
/// Skipped steps are not tracked by the iterator, so the provider
/// remembers them from skip events.
#[derive(Debug, Clone, Default)]
pub struct LabelProvider {
    strategy: LabelIconStrategy,
    skipped: HashSet<StepId>,
}

impl LabelProvider {
    pub fn new(strategy: LabelIconStrategy) -> Self {
        Self {
            strategy,
            skipped: HashSet::new(),
        }
    }

    pub fn strategy(&self) -> LabelIconStrategy {
        self.strategy
    }

    /// Update skip bookkeeping from an iterator event
    pub fn observe(&mut self, iterator: &StepIterator, event: &StepEvent) {
        match event {
            StepEvent::Advanced {
                transition: Transition::Skip,
                previous: Some(previous),
                ..
            } => {
                self.skipped.insert(previous.id());
            }
            StepEvent::ElementRemoved { step, .. } => {
                self.skipped.remove(&step.id());
            }
            _ => {}
        }

        self.skipped
            .retain(|id| iterator.step(*id).is_some_and(|s| !iterator.is_step_complete(s)));
    }

    pub fn is_skipped(&self, step: &Step) -> bool {
        self.skipped.contains(&step.id())
    }

    /// Labels for every step in sequence order
    pub fn labels(&self, iterator: &StepIterator, errors: &HashMap<StepId, String>) -> Vec<StepLabel> {
        iterator
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| self.label(iterator, step, i + 1, errors.get(&step.id()).cloned()))
            .collect()
    }

    fn label(&self, iterator: &StepIterator, step: &Step, number: usize, error: Option<String>) -> StepLabel {
        let active = iterator.current() == Some(step);
        let icon = if error.is_some() {
            LabelIcon::Error
        } else if active {
            LabelIcon::Number(number)
        } else if iterator.is_step_complete(step) {
            if step.is_editable() && self.strategy.allow_editable() {
                LabelIcon::Editable
            } else if self.strategy.allow_nexted() {
                LabelIcon::Complete
            } else {
                LabelIcon::Number(number)
            }
        } else if self.is_skipped(step) && self.strategy.allow_skipped() {
            LabelIcon::Skipped
        } else {
            LabelIcon::Number(number)
        };

        StepLabel {
            number,
            caption: step.caption(),
            description: step.description(),
            icon,
            active,
            disabled: step.is_disabled(),
            error,
        }
    }
}
