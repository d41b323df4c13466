//! Step iterator - the navigation state machine
//!
//! The iterator owns the ordered step sequence, the visitation state of
//! every step and the current position. It decides which transitions are
//! legal under the linear or free policy and publishes a [`StepEvent`] for
//! every change.

use crate::core::{
    error::StepperError,
    event::{EventHandler, EventKind, HandlerId, StepEvent, Transition},
    state::{StateTracker, StepState},
    step::{Step, StepId, SubscriptionId},
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::debug;

/// Iterator over steps that allows transitions based on the steps' attributes
pub struct StepIterator {
    steps: Vec<Step>,
    tracker: Arc<RwLock<StateTracker>>,
    subscriptions: HashMap<StepId, [SubscriptionId; 2]>,
    handlers: Vec<(HandlerId, EventHandler)>,
    next_handler: u64,
    current: Option<Step>,
    start_at: Option<Step>,
    linear: bool,
    read_only: bool,
    locked: bool,
}

impl StepIterator {
    /// Create an iterator for the given steps and policy
    ///
    /// Fails with [`StepperError::DuplicateStep`] when a step is listed twice.
    pub fn new(steps: Vec<Step>, linear: bool, start_at: Option<Step>) -> Result<Self, StepperError> {
        let mut iterator = Self {
            steps: Vec::new(),
            tracker: Arc::new(RwLock::new(StateTracker::new())),
            subscriptions: HashMap::new(),
            handlers: Vec::new(),
            next_handler: 0,
            current: None,
            start_at,
            linear,
            read_only: false,
            locked: false,
        };

        for step in steps {
            iterator.add(step)?;
        }

        Ok(iterator)
    }

    /// Create an empty iterator with the given policy
    pub fn with_policy(linear: bool) -> Self {
        Self {
            steps: Vec::new(),
            tracker: Arc::new(RwLock::new(StateTracker::new())),
            subscriptions: HashMap::new(),
            handlers: Vec::new(),
            next_handler: 0,
            current: None,
            start_at: None,
            linear,
            read_only: false,
            locked: false,
        }
    }

    pub fn is_linear(&self) -> bool {
        self.linear
    }

    pub fn set_linear(&mut self, linear: bool) {
        self.linear = linear;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// In read-only mode navigation calls report availability truthfully but change nothing
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Cooperative flag for renderers. Navigation legality does not depend on it.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn start_at(&self) -> Option<&Step> {
        self.start_at.as_ref()
    }

    pub fn set_start_at(&mut self, start_at: Option<Step>) {
        self.start_at = start_at;
    }

    /// Read-only view of the step sequence
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<&Step> {
        self.current.as_ref()
    }

    pub fn contains(&self, step: &Step) -> bool {
        self.steps.contains(step)
    }

    /// Index of a step in the sequence
    pub fn position(&self, step: &Step) -> Option<usize> {
        self.steps.iter().position(|s| s == step)
    }

    /// Look up a step by identity
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id() == id)
    }

    /// First step with the given caption
    pub fn find(&self, caption: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.caption() == caption)
    }

    /// Check if every step in the sequence has been visited
    pub fn is_complete(&self) -> bool {
        let tracker = self.tracker();
        self.steps.iter().all(|s| tracker.is_visited(s.id()))
    }

    pub fn is_step_complete(&self, step: &Step) -> bool {
        self.tracker().is_visited(step.id())
    }

    pub fn step_state(&self, step: &Step) -> StepState {
        self.tracker().state(step.id())
    }

    /// Mark a step visited without firing its complete signal
    pub fn set_step_visited(&self, step: &Step) {
        if self.contains(step) {
            self.tracker_mut().set_visited(step.id());
        }
    }

    /// Mark a step unvisited without firing its reset signal
    pub fn reset_step(&self, step: &Step) {
        if self.contains(step) {
            self.tracker_mut().set_unvisited(step.id());
        }
    }

    /// Last step that is not disabled
    pub fn last_visitable_step(&self) -> Result<&Step, StepperError> {
        self.steps
            .iter()
            .rev()
            .find(|s| !s.is_disabled())
            .ok_or(StepperError::EmptySequence)
    }

    /// Check whether moving to `to` is legal
    ///
    /// `None` stands for "no further step" and is always allowed. With
    /// `treat_current_as_complete` unset the current step is left out of the
    /// open set, so under the linear policy the step after it becomes the
    /// head.
    pub fn is_transition_allowed(&self, to: Option<&Step>, treat_current_as_complete: bool) -> bool {
        let Some(to) = to else {
            return true;
        };

        if to.is_disabled() {
            return false;
        }

        if !self.contains(to) || self.current.as_ref() == Some(to) || self.is_complete() {
            return false;
        }

        let tracker = self.tracker();
        if tracker.is_visited(to.id()) && to.is_editable() {
            return true;
        }

        let mut open = self
            .steps
            .iter()
            .filter(|s| treat_current_as_complete || self.current.as_ref() != Some(*s))
            .filter(|s| !tracker.is_visited(s.id()))
            .filter(|s| !s.is_disabled());

        if self.linear {
            open.next() == Some(to)
        } else {
            open.any(|s| s == to)
        }
    }

    /// Index the next `next()` call would move to
    pub fn next_index(&self) -> Option<usize> {
        let Some(current) = &self.current else {
            if self.steps.is_empty() {
                return None;
            }
            let start = self.start_at.as_ref().and_then(|s| self.position(s));
            return Some(start.unwrap_or(0));
        };

        self.steps.iter().position(|s| {
            (s == current || self.is_transition_allowed(Some(s), false)) && !self.is_step_complete(s)
        })
    }

    /// Index the next `previous()` call would move to
    pub fn previous_index(&self) -> Option<usize> {
        let end = self
            .current
            .as_ref()
            .and_then(|c| self.position(c))
            .unwrap_or(0);

        self.steps[..end]
            .iter()
            .rposition(|s| self.is_transition_allowed(Some(s), false))
    }

    fn skip_index(&self) -> Option<usize> {
        let current = self.current.as_ref().filter(|c| c.is_optional())?;

        self.steps.iter().position(|s| {
            s != current && !self.is_step_complete(s) && self.is_transition_allowed(Some(s), false)
        })
    }

    pub fn has_next(&self) -> bool {
        self.next_index().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous_index().is_some()
    }

    /// Check if the current step is optional and a step after it is reachable
    pub fn has_skip(&self) -> bool {
        self.skip_index().is_some()
    }

    pub fn has_move_to(&self, target: Option<&Step>) -> bool {
        self.is_transition_allowed(target, self.linear)
    }

    /// Move to the next step
    pub fn next(&mut self) -> Result<Option<Step>, StepperError> {
        let index = self
            .next_index()
            .ok_or_else(|| StepperError::illegal(Transition::Next, None))?;

        if self.read_only {
            debug!("Read-only: ignoring next");
            return Ok(self.current.clone());
        }

        let previous = self.current.replace(self.steps[index].clone());
        debug!(
            "next: {:?} -> {:?}",
            previous.as_ref().map(Step::caption),
            self.steps[index].caption()
        );
        self.announce_forward(Transition::Next, previous);

        Ok(self.current.clone())
    }

    /// Move back to the closest reachable step before the current one
    pub fn previous(&mut self) -> Result<Option<Step>, StepperError> {
        let index = self
            .previous_index()
            .ok_or_else(|| StepperError::illegal(Transition::Previous, None))?;

        if self.read_only {
            debug!("Read-only: ignoring previous");
            return Ok(self.current.clone());
        }

        let previous = self.current.replace(self.steps[index].clone());
        debug!(
            "previous: {:?} -> {:?}",
            previous.as_ref().map(Step::caption),
            self.steps[index].caption()
        );
        self.emit(StepEvent::Advanced {
            transition: Transition::Previous,
            previous,
            current: self.current.clone(),
        });

        Ok(self.current.clone())
    }

    /// Skip the current, optional step without marking it visited
    pub fn skip(&mut self) -> Result<Option<Step>, StepperError> {
        let index = self
            .skip_index()
            .ok_or_else(|| StepperError::illegal(Transition::Skip, None))?;

        if self.read_only {
            debug!("Read-only: ignoring skip");
            return Ok(self.current.clone());
        }

        let previous = self.current.replace(self.steps[index].clone());
        debug!(
            "skip: {:?} -> {:?}",
            previous.as_ref().map(Step::caption),
            self.steps[index].caption()
        );
        self.announce_forward(Transition::Skip, previous);

        Ok(self.current.clone())
    }

    /// Jump to an arbitrary step, or to no step with `None`
    pub fn move_to(&mut self, target: Option<&Step>) -> Result<Option<Step>, StepperError> {
        if !self.has_move_to(target) {
            return Err(StepperError::illegal(
                Transition::Move,
                target.map(Step::caption),
            ));
        }

        if self.read_only {
            debug!("Read-only: ignoring move");
            return Ok(self.current.clone());
        }

        let previous = std::mem::replace(&mut self.current, target.cloned());
        debug!(
            "move: {:?} -> {:?}",
            previous.as_ref().map(Step::caption),
            target.map(Step::caption)
        );
        self.emit(StepEvent::Advanced {
            transition: Transition::Move,
            previous,
            current: self.current.clone(),
        });

        Ok(self.current.clone())
    }

    fn announce_forward(&self, transition: Transition, previous: Option<Step>) {
        let current = self.current.clone();

        if previous.is_none() {
            self.emit(StepEvent::Started {
                transition,
                previous: None,
                current: current.clone(),
            });
        }

        self.emit(StepEvent::Advanced {
            transition,
            previous: previous.clone(),
            current: current.clone(),
        });

        if !self.has_skip() && !self.has_next() {
            self.emit(StepEvent::Ended {
                transition,
                previous,
                current,
            });
        }
    }

    /// Insert a step right after the current one, or at the end when there is none
    pub fn add(&mut self, step: Step) -> Result<(), StepperError> {
        if self.contains(&step) {
            return Err(StepperError::DuplicateStep(step.id()));
        }

        let index = self
            .current
            .as_ref()
            .and_then(|c| self.position(c))
            .map_or(self.steps.len(), |i| i + 1);

        self.subscribe(&step);
        self.steps.insert(index, step.clone());
        debug!("Added step '{}' at position {}", step.caption(), index);

        self.emit(StepEvent::ElementAdded {
            steps: self.steps.clone(),
            step,
        });

        Ok(())
    }

    /// Remove the current step and move on to the first reachable unvisited step
    ///
    /// Returns the new current step, `None` when nothing is reachable.
    pub fn remove(&mut self) -> Result<Option<Step>, StepperError> {
        let removed = self.current.clone().ok_or(StepperError::NoCurrentStep)?;

        if self.read_only {
            debug!("Read-only: ignoring remove");
            return Ok(self.current.clone());
        }

        if let Some(index) = self.position(&removed) {
            self.steps.remove(index);
        }
        self.tracker_mut().remove(removed.id());
        self.unsubscribe(&removed);
        self.current = None;
        debug!("Removed step '{}'", removed.caption());

        self.emit(StepEvent::ElementRemoved {
            steps: self.steps.clone(),
            step: removed.clone(),
        });

        self.current = self
            .steps
            .iter()
            .find(|s| !self.is_step_complete(s) && self.is_transition_allowed(Some(s), self.linear))
            .cloned();

        self.emit(StepEvent::Advanced {
            transition: Transition::Move,
            previous: Some(removed),
            current: self.current.clone(),
        });

        Ok(self.current.clone())
    }

    /// Overwriting a slot is not supported; only add-after-current and remove-current are
    pub fn set(&mut self, step: Step) -> Result<(), StepperError> {
        Err(StepperError::UnsupportedMutation(format!(
            "cannot overwrite a slot with step '{}'",
            step.caption()
        )))
    }

    fn subscribe(&mut self, step: &Step) {
        let tracker: Weak<RwLock<StateTracker>> = Arc::downgrade(&self.tracker);
        let complete = step.on_complete(move |s| {
            if let Some(tracker) = tracker.upgrade() {
                tracker
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .set_visited(s.id());
            }
        });

        let tracker: Weak<RwLock<StateTracker>> = Arc::downgrade(&self.tracker);
        let reset = step.on_reset(move |s| {
            if let Some(tracker) = tracker.upgrade() {
                tracker
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .set_unvisited(s.id());
            }
        });

        self.subscriptions.insert(step.id(), [complete, reset]);
    }

    fn unsubscribe(&mut self, step: &Step) {
        if let Some(ids) = self.subscriptions.remove(&step.id()) {
            for id in ids {
                step.unsubscribe(id);
            }
        }
    }

    /// Add an event handler for every event kind
    pub fn add_event_handler<F>(&mut self, handler: F) -> HandlerId
    where
        F: Fn(&StepIterator, &StepEvent) + Send + Sync + 'static,
    {
        let id = HandlerId(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Add an event handler for a single event kind
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: Fn(&StepIterator, &StepEvent) + Send + Sync + 'static,
    {
        self.add_event_handler(move |iterator, event| {
            if event.kind() == kind {
                handler(iterator, event);
            }
        })
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn remove_event_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(existing, _)| *existing != id);
        self.handlers.len() != before
    }

    /// Emit an event to all handlers
    fn emit(&self, event: StepEvent) {
        for (_, handler) in &self.handlers {
            handler(self, &event);
        }
    }

    fn tracker(&self) -> RwLockReadGuard<'_, StateTracker> {
        self.tracker.read().unwrap_or_else(|e| e.into_inner())
    }

    fn tracker_mut(&self) -> RwLockWriteGuard<'_, StateTracker> {
        self.tracker.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StepIterator {
    fn default() -> Self {
        Self::with_policy(false)
    }
}

impl Drop for StepIterator {
    fn drop(&mut self) {
        for step in std::mem::take(&mut self.steps) {
            self.unsubscribe(&step);
        }
    }
}

impl std::fmt::Debug for StepIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepIterator")
            .field("steps", &self.steps)
            .field("current", &self.current)
            .field("linear", &self.linear)
            .field("read_only", &self.read_only)
            .field("locked", &self.locked)
            .finish()
    }
}
