//! Session engine - drives a wizard from an action source

use crate::core::{StepEvent, StepIndex, StepperError, Transition, Wizard};
use crate::render::Renderer;
use crate::session::{Action, ActionSource, Stepper};
use anyhow::Result;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Every step was visited
    Completed,
    /// The user cancelled or quit
    Cancelled,
    /// The action source ran dry first
    Abandoned,
}

/// A recorded transition, using configured step ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub transition: Transition,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Result of a wizard session
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session_id: Uuid,
    pub wizard: String,
    pub status: SessionStatus,
    /// Configured ids of the visited steps, in sequence order
    pub visited: Vec<String>,
    /// Configured id of the step active at the end
    pub current: Option<String>,
    pub transitions: Vec<TransitionRecord>,
    /// Number of actions the stepper refused
    pub refused: usize,
}

impl SessionOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

/// Runs a wizard until it completes, is cancelled or runs out of actions
pub struct WizardSession {
    session_id: Uuid,
    name: String,
    index: StepIndex,
    stepper: Stepper,
    transitions: Arc<Mutex<Vec<TransitionRecord>>>,
}

impl WizardSession {
    pub fn new(wizard: Wizard, renderer: Box<dyn Renderer>) -> Self {
        let Wizard {
            name,
            icons,
            mut iterator,
            index,
            ..
        } = wizard;

        let transitions = Arc::new(Mutex::new(Vec::new()));
        let log = transitions.clone();
        let ids = index.clone();
        iterator.add_event_handler(move |_, event| {
            if let StepEvent::Advanced {
                transition,
                previous,
                current,
            } = event
            {
                let id_of = |step: &Option<crate::core::Step>| {
                    step.as_ref().and_then(|s| ids.id_of(s)).map(str::to_string)
                };
                log.lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(TransitionRecord {
                        transition: *transition,
                        from: id_of(previous),
                        to: id_of(current),
                    });
            }
        });

        Self {
            session_id: Uuid::new_v4(),
            name,
            index,
            stepper: Stepper::new(iterator, renderer, icons),
            transitions,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn stepper_mut(&mut self) -> &mut Stepper {
        &mut self.stepper
    }

    /// Run the session to its end
    pub async fn run<S: ActionSource + ?Sized>(&mut self, source: &mut S) -> Result<SessionOutcome> {
        info!("Starting wizard session: {} ({})", self.name, self.session_id);
        self.stepper.start()?;

        let mut refused = 0;
        let status = loop {
            if self.stepper.is_complete() {
                break SessionStatus::Completed;
            }

            let Some(action) = source.next_action().await? else {
                break SessionStatus::Abandoned;
            };
            debug!("Action: {}", action);

            match action {
                Action::Cancel | Action::Quit => {
                    if action == Action::Cancel && !self.current_cancellable() {
                        refused += 1;
                        self.refuse(&action, "This step cannot be cancelled")?;
                        continue;
                    }
                    break SessionStatus::Cancelled;
                }
                _ => {
                    if let Err(err) = self.apply(&action) {
                        refused += 1;
                        self.refuse(&action, &err.to_string())?;
                    }
                }
            }
        };

        let outcome = self.outcome(status, refused);
        info!(
            "Wizard session {} finished: {:?} ({} transitions, {} refused)",
            self.session_id,
            outcome.status,
            outcome.transitions.len(),
            outcome.refused
        );
        Ok(outcome)
    }

    fn apply(&mut self, action: &Action) -> Result<(), SessionError> {
        match action {
            Action::Next => self.stepper.next()?,
            Action::Back => self.stepper.back()?,
            Action::Skip => self.stepper.skip()?,
            Action::Goto(id) => {
                let step = self.lookup(id)?;
                self.stepper.move_to(&step)?;
            }
            Action::Reset(id) => {
                let step = self.lookup(id)?;
                self.stepper.reset(&step)?;
            }
            Action::Remove => {
                self.stepper.remove_current()?;
            }
            Action::Cancel | Action::Quit => {}
        }
        Ok(())
    }

    fn lookup(&self, id: &str) -> Result<crate::core::Step, SessionError> {
        self.index
            .get(id)
            .filter(|step| self.stepper.iterator().contains(step))
            .cloned()
            .ok_or_else(|| SessionError::UnknownStep(id.to_string()))
    }

    fn current_cancellable(&self) -> bool {
        self.stepper.current().is_some_and(|s| s.is_cancellable())
    }

    fn refuse(&mut self, action: &Action, reason: &str) -> Result<()> {
        warn!("Refused '{}': {}", action, reason);
        self.stepper.show_current_error(reason)?;
        Ok(())
    }

    fn outcome(&self, status: SessionStatus, refused: usize) -> SessionOutcome {
        let iterator = self.stepper.iterator();
        let visited = iterator
            .steps()
            .iter()
            .filter(|s| iterator.is_step_complete(s))
            .filter_map(|s| self.index.id_of(s))
            .map(str::to_string)
            .collect();

        SessionOutcome {
            session_id: self.session_id,
            wizard: self.name.clone(),
            status,
            visited,
            current: iterator
                .current()
                .and_then(|s| self.index.id_of(s))
                .map(str::to_string),
            transitions: self
                .transitions
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
            refused,
        }
    }
}

/// Reasons a single action cannot be applied
#[derive(Debug, thiserror::Error)]
enum SessionError {
    #[error("No step with id '{0}'")]
    UnknownStep(String),

    #[error(transparent)]
    Stepper(#[from] StepperError),
}
