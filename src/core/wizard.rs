//! Wizard domain model

use crate::core::{
    config::WizardConfig,
    iterator::StepIterator,
    step::{Step, StepAttributes},
};
use crate::render::{LabelIconStrategy, Layout};
use anyhow::{Context, Result};

/// Maps configured step ids to step handles
#[derive(Debug, Clone, Default)]
pub struct StepIndex {
    entries: Vec<(String, Step)>,
}

impl StepIndex {
    pub fn insert(&mut self, id: impl Into<String>, step: Step) {
        self.entries.push((id.into(), step));
    }

    /// Get a step by its configured id
    pub fn get(&self, id: &str) -> Option<&Step> {
        self.entries.iter().find(|(i, _)| i == id).map(|(_, s)| s)
    }

    /// Get the configured id of a step
    pub fn id_of(&self, step: &Step) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, s)| s == step)
            .map(|(i, _)| i.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(i, _)| i.as_str())
    }
}

/// A wizard built from configuration
#[derive(Debug)]
pub struct Wizard {
    /// Wizard name
    pub name: String,

    /// Layout the wizard should be rendered with
    pub layout: Layout,

    /// Label icon strategy
    pub icons: LabelIconStrategy,

    /// Navigation state machine over the configured steps
    pub iterator: StepIterator,

    /// Configured ids of the steps
    pub index: StepIndex,
}

impl Wizard {
    /// Create a wizard from configuration
    pub fn from_config(config: &WizardConfig) -> Result<Self> {
        let mut index = StepIndex::default();
        let steps: Vec<Step> = config
            .steps
            .iter()
            .map(|step_config| {
                let step = Step::from_attributes(StepAttributes {
                    caption: step_config.caption.clone(),
                    description: step_config.description.clone(),
                    optional: step_config.optional,
                    editable: step_config.editable,
                    disabled: step_config.disabled,
                    cancellable: step_config.cancellable,
                });
                index.insert(step_config.id.clone(), step.clone());
                step
            })
            .collect();

        // Without an explicit start the wizard opens on the first enabled step
        let start_at = match config.start_at.as_deref() {
            Some(id) => index.get(id).cloned(),
            None => steps.iter().find(|s| !s.is_disabled()).cloned(),
        };

        let iterator = StepIterator::new(steps, config.linear, start_at)
            .with_context(|| format!("Failed to build wizard '{}'", config.name))?;

        Ok(Wizard {
            name: config.name.clone(),
            layout: config.layout,
            icons: config.icons,
            iterator,
            index,
        })
    }
}
