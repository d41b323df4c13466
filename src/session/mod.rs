//! Wizard sessions - the stepper facade and the loop that feeds it actions

pub mod engine;
pub mod input;
pub mod stepper;

pub use engine::{SessionOutcome, SessionStatus, TransitionRecord, WizardSession};
pub use input::{Action, ActionSource, LineActions, ScriptedActions, StdinActions};
pub use stepper::{CompleteHandler, Stepper};
