//! stepper - a wizard navigation engine with terminal renderers

pub mod cli;
pub mod core;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Step, StepEvent, StepId, StepIterator, StepState, StepperError, Transition, Wizard};
pub use crate::render::{Layout, Renderer, StepperView, Theme};
pub use crate::session::{Action, ActionSource, SessionOutcome, Stepper, WizardSession};
