//! Wizard configuration from YAML

use crate::core::Wizard;
use crate::render::{LabelIconStrategy, Layout};
use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pattern every step id has to match
const STEP_ID_PATTERN: &str = r"^[a-z0-9][a-z0-9_-]*$";

/// Top-level wizard configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Wizard name
    pub name: String,

    /// Strict in-order navigation (default) or free navigation
    #[serde(default = "default_linear")]
    pub linear: bool,

    /// Id of the step to start at (optional)
    #[serde(default)]
    pub start_at: Option<String>,

    /// Visual layout used by the CLI
    #[serde(default)]
    pub layout: Layout,

    /// Label icon strategy
    #[serde(default)]
    pub icons: LabelIconStrategy,

    /// Wizard steps, in navigation order
    pub steps: Vec<StepConfig>,
}

/// Step configuration as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    /// Unique step identifier
    pub id: String,

    /// Label shown in the step bar
    pub caption: String,

    /// Optional step description
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the step may be skipped
    #[serde(default)]
    pub optional: bool,

    /// Whether the step may be re-entered once completed
    #[serde(default)]
    pub editable: bool,

    /// Whether the step is unreachable
    #[serde(default)]
    pub disabled: bool,

    /// Whether the step offers a cancel action
    #[serde(default)]
    pub cancellable: bool,
}

fn default_linear() -> bool {
    true
}

impl WizardConfig {
    /// Load wizard configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse wizard configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: WizardConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the wizard configuration
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            anyhow::bail!("Wizard '{}' has no steps", self.name);
        }

        let id_pattern = Regex::new(STEP_ID_PATTERN)?;
        let mut seen_ids = std::collections::HashSet::new();
        for step in &self.steps {
            if !id_pattern.is_match(&step.id) {
                anyhow::bail!(
                    "Step id '{}' must match {}",
                    step.id,
                    STEP_ID_PATTERN
                );
            }
            if !seen_ids.insert(&step.id) {
                anyhow::bail!("Duplicate step ID: {}", step.id);
            }
            if step.caption.trim().is_empty() {
                anyhow::bail!("Step '{}' has an empty caption", step.id);
            }
        }

        if self.steps.iter().all(|s| s.disabled) {
            anyhow::bail!("Wizard '{}' has no enabled step", self.name);
        }

        if let Some(ref start_at) = self.start_at {
            match self.steps.iter().find(|s| &s.id == start_at) {
                None => anyhow::bail!("start_at references non-existent step '{}'", start_at),
                Some(step) if step.disabled => {
                    anyhow::bail!("start_at references disabled step '{}'", start_at)
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Convert config to a Wizard domain model
    pub fn to_wizard(&self) -> Result<Wizard> {
        Wizard::from_config(self)
    }
}
