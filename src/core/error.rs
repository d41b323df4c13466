//! Error types for stepper operations

use crate::core::{event::Transition, step::StepId};
use thiserror::Error;

/// Errors raised by the step iterator and the stepper facade
///
/// Every variant signals a violated precondition. The operation that
/// returned it left the iterator untouched.
#[derive(Debug, Error)]
pub enum StepperError {
    #[error("No legal {transition} transition{}", describe_target(.target))]
    IllegalTransition {
        transition: Transition,
        target: Option<String>,
    },

    #[error("There is no current step")]
    NoCurrentStep,

    #[error("Unsupported mutation: {0}")]
    UnsupportedMutation(String),

    #[error("No visitable step in the sequence")]
    EmptySequence,

    #[error("Step {0} is already part of the sequence")]
    DuplicateStep(StepId),

    #[error("The stepper is locked to its current step")]
    Locked,

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

fn describe_target(target: &Option<String>) -> String {
    target
        .as_ref()
        .map(|t| format!(" to '{}'", t))
        .unwrap_or_default()
}

impl StepperError {
    pub(crate) fn illegal(transition: Transition, target: Option<String>) -> Self {
        StepperError::IllegalTransition { transition, target }
    }
}
