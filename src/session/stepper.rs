//! Stepper facade - connects a step iterator to a renderer
//!
//! The facade never decides navigation legality itself. It forwards user
//! intents to the [`StepIterator`], collects the events the iterator
//! publishes and re-renders once per operation when something changed.

use crate::core::{Step, StepEvent, StepId, StepIterator, StepperError};
use crate::render::{ActiveStep, ButtonBar, LabelIconStrategy, LabelProvider, Renderer, StepperView};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Type for stepper-complete handlers
pub type CompleteHandler = Arc<dyn Fn(&Stepper) + Send + Sync>;

/// A step iterator with labels, messages and a renderer attached
pub struct Stepper {
    iterator: StepIterator,
    labels: LabelProvider,
    renderer: Box<dyn Renderer>,
    pending: Arc<Mutex<Vec<StepEvent>>>,
    errors: HashMap<StepId, String>,
    feedback: Option<String>,
    completed: bool,
    complete_handlers: Vec<CompleteHandler>,
}

impl Stepper {
    pub fn new(mut iterator: StepIterator, renderer: Box<dyn Renderer>, icons: LabelIconStrategy) -> Self {
        let pending = Arc::new(Mutex::new(Vec::new()));
        let sink = pending.clone();
        iterator.add_event_handler(move |_, event| {
            sink.lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(event.clone());
        });

        let completed = !iterator.is_empty() && iterator.is_complete();

        Self {
            iterator,
            labels: LabelProvider::new(icons),
            renderer,
            pending,
            errors: HashMap::new(),
            feedback: None,
            completed,
            complete_handlers: Vec::new(),
        }
    }

    /// The underlying iterator, for queries
    pub fn iterator(&self) -> &StepIterator {
        &self.iterator
    }

    pub fn steps(&self) -> &[Step] {
        self.iterator.steps()
    }

    pub fn current(&self) -> Option<&Step> {
        self.iterator.current()
    }

    pub fn is_complete(&self) -> bool {
        self.iterator.is_complete()
    }

    pub fn is_step_complete(&self, step: &Step) -> bool {
        self.iterator.is_step_complete(step)
    }

    /// Add a handler called once each time the stepper becomes complete
    pub fn add_complete_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Stepper) + Send + Sync + 'static,
    {
        self.complete_handlers.push(Arc::new(handler));
    }

    /// Activate the first step. Does nothing once a step is active.
    pub fn start(&mut self) -> Result<(), StepperError> {
        if self.iterator.current().is_none() {
            info!("Starting stepper with {} steps", self.iterator.len());
            self.iterator.next()?;
        }
        self.sync(true)
    }

    /// Complete the current step and move forward
    ///
    /// When the move fails the current step's completion is rolled back.
    pub fn next(&mut self) -> Result<(), StepperError> {
        self.ensure_unlocked()?;
        if self.iterator.is_read_only() {
            debug!("Read-only: ignoring next");
            return Ok(());
        }

        let Some(current) = self.iterator.current().cloned() else {
            return self.start();
        };

        let was_complete = self.iterator.is_step_complete(&current);
        current.fire_complete();
        self.errors.remove(&current.id());

        if !self.iterator.is_complete() {
            if let Err(err) = self.iterator.next() {
                if !was_complete {
                    current.fire_reset();
                }
                warn!("Cannot move past '{}': {}", current.caption(), err);
                return Err(err);
            }
        }

        self.sync(false)
    }

    /// Move a step back
    pub fn back(&mut self) -> Result<(), StepperError> {
        self.ensure_unlocked()?;
        self.iterator.previous()?;
        self.sync(false)
    }

    /// Skip the current, optional step
    pub fn skip(&mut self) -> Result<(), StepperError> {
        self.ensure_unlocked()?;
        self.iterator.skip()?;
        self.sync(false)
    }

    /// Jump to a step
    pub fn move_to(&mut self, step: &Step) -> Result<(), StepperError> {
        self.ensure_unlocked()?;
        self.iterator.move_to(Some(step))?;
        self.sync(false)
    }

    /// Invalidate a step's progress
    pub fn reset(&mut self, step: &Step) -> Result<(), StepperError> {
        step.fire_reset();
        self.sync(false)
    }

    /// Insert a step after the current one
    pub fn add_step(&mut self, step: Step) -> Result<(), StepperError> {
        self.iterator.add(step)?;
        self.sync(false)
    }

    /// Remove the current step
    pub fn remove_current(&mut self) -> Result<Option<Step>, StepperError> {
        self.ensure_unlocked()?;
        if let Some(current) = self.iterator.current().filter(|_| !self.iterator.is_read_only()) {
            self.errors.remove(&current.id());
        }
        let next = self.iterator.remove()?;
        self.sync(false)?;
        Ok(next)
    }

    fn ensure_unlocked(&self) -> Result<(), StepperError> {
        if self.iterator.is_locked() {
            warn!("Stepper is locked, refusing navigation");
            return Err(StepperError::Locked);
        }
        Ok(())
    }

    /// Lock the stepper to the current step
    pub fn lock(&mut self) -> Result<(), StepperError> {
        self.iterator.set_locked(true);
        self.refresh()
    }

    pub fn unlock(&mut self) -> Result<(), StepperError> {
        self.iterator.set_locked(false);
        self.refresh()
    }

    pub fn is_locked(&self) -> bool {
        self.iterator.is_locked()
    }

    pub fn set_read_only(&mut self, read_only: bool) -> Result<(), StepperError> {
        self.iterator.set_read_only(read_only);
        self.refresh()
    }

    pub fn is_read_only(&self) -> bool {
        self.iterator.is_read_only()
    }

    /// Show an error for a step
    pub fn show_error(&mut self, step: &Step, message: impl Into<String>) -> Result<(), StepperError> {
        self.errors.insert(step.id(), message.into());
        self.refresh()
    }

    /// Show an error for the current step. Does nothing without a current step.
    pub fn show_current_error(&mut self, message: impl Into<String>) -> Result<(), StepperError> {
        match self.iterator.current().cloned() {
            Some(current) => self.show_error(&current, message),
            None => Ok(()),
        }
    }

    pub fn hide_error(&mut self, step: &Step) -> Result<(), StepperError> {
        if self.errors.remove(&step.id()).is_some() {
            self.refresh()?;
        }
        Ok(())
    }

    pub fn error(&self, step: &Step) -> Option<&str> {
        self.errors.get(&step.id()).map(String::as_str)
    }

    /// Show a transition message in place of the step bar
    pub fn show_feedback_message(&mut self, message: impl Into<String>) -> Result<(), StepperError> {
        let message = message.into();
        self.renderer.show_feedback(Some(&message))?;
        self.feedback = Some(message);
        self.refresh()
    }

    pub fn hide_feedback_message(&mut self) -> Result<(), StepperError> {
        if self.feedback.take().is_some() {
            self.renderer.show_feedback(None)?;
            self.refresh()?;
        }
        Ok(())
    }

    pub fn feedback_message(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Snapshot of the stepper for renderers
    pub fn view(&self) -> StepperView {
        let current = self.iterator.current();
        let complete = self.iterator.is_complete();

        let active = current.map(|step| ActiveStep {
            number: self.iterator.position(step).map_or(0, |i| i + 1),
            caption: step.caption(),
            description: step.description(),
            error: self.errors.get(&step.id()).cloned(),
        });

        let buttons = match current {
            Some(step) => ButtonBar {
                back: self.iterator.has_previous(),
                cancel: step.is_cancellable(),
                skip: step.is_optional(),
                next: !complete,
            },
            None => ButtonBar::default(),
        };

        StepperView {
            labels: self.labels.labels(&self.iterator, &self.errors),
            active,
            buttons,
            locked: self.iterator.is_locked(),
            read_only: self.iterator.is_read_only(),
            complete,
        }
    }

    /// Re-render unconditionally
    pub fn refresh(&mut self) -> Result<(), StepperError> {
        let view = self.view();
        self.renderer.render(&view)?;
        Ok(())
    }

    /// Drain pending iterator events, update labels and completion, re-render if needed
    fn sync(&mut self, force: bool) -> Result<(), StepperError> {
        let events: Vec<StepEvent> = std::mem::take(
            &mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()),
        );
        for event in &events {
            self.labels.observe(&self.iterator, event);
        }

        let complete = !self.iterator.is_empty() && self.iterator.is_complete();
        let completion_changed = complete != self.completed;
        self.completed = complete;

        if completion_changed {
            self.renderer.set_buttons_hidden(complete);
            if complete {
                info!("All {} steps complete", self.iterator.len());
                let handlers = self.complete_handlers.clone();
                for handler in handlers {
                    handler(self);
                }
            }
        }

        if force || completion_changed || !events.is_empty() {
            self.refresh()?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("iterator", &self.iterator)
            .field("feedback", &self.feedback)
            .field("completed", &self.completed)
            .finish()
    }
}
