//! Events published by the step iterator

use crate::core::{iterator::StepIterator, step::Step};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind of navigation that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Next,
    Previous,
    Skip,
    Move,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transition::Next => "next",
            Transition::Previous => "previous",
            Transition::Skip => "skip",
            Transition::Move => "move",
        };
        f.write_str(name)
    }
}

/// Events that can occur while navigating a step sequence
#[derive(Debug, Clone)]
pub enum StepEvent {
    /// A step was inserted. `steps` is the sequence after insertion.
    ElementAdded {
        steps: Vec<Step>,
        step: Step,
    },
    /// A step was removed. `steps` is the sequence after removal.
    ElementRemoved {
        steps: Vec<Step>,
        step: Step,
    },
    /// Navigation left the "no current step" state
    Started {
        transition: Transition,
        previous: Option<Step>,
        current: Option<Step>,
    },
    /// The current step changed
    Advanced {
        transition: Transition,
        previous: Option<Step>,
        current: Option<Step>,
    },
    /// Neither a next nor a skip transition is available anymore
    Ended {
        transition: Transition,
        previous: Option<Step>,
        current: Option<Step>,
    },
}

/// Discriminant of [`StepEvent`], used to subscribe to a single kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ElementAdded,
    ElementRemoved,
    Started,
    Advanced,
    Ended,
}

impl StepEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StepEvent::ElementAdded { .. } => EventKind::ElementAdded,
            StepEvent::ElementRemoved { .. } => EventKind::ElementRemoved,
            StepEvent::Started { .. } => EventKind::Started,
            StepEvent::Advanced { .. } => EventKind::Advanced,
            StepEvent::Ended { .. } => EventKind::Ended,
        }
    }

    /// The transition for navigation events, `None` for collection events
    pub fn transition(&self) -> Option<Transition> {
        match self {
            StepEvent::Started { transition, .. }
            | StepEvent::Advanced { transition, .. }
            | StepEvent::Ended { transition, .. } => Some(*transition),
            _ => None,
        }
    }

    /// Step that was current before a navigation event
    pub fn previous(&self) -> Option<&Step> {
        match self {
            StepEvent::Started { previous, .. }
            | StepEvent::Advanced { previous, .. }
            | StepEvent::Ended { previous, .. } => previous.as_ref(),
            _ => None,
        }
    }

    /// Step that is current after a navigation event
    pub fn current(&self) -> Option<&Step> {
        match self {
            StepEvent::Started { current, .. }
            | StepEvent::Advanced { current, .. }
            | StepEvent::Ended { current, .. } => current.as_ref(),
            _ => None,
        }
    }

    /// Step affected by a collection event
    pub fn element(&self) -> Option<&Step> {
        match self {
            StepEvent::ElementAdded { step, .. } | StepEvent::ElementRemoved { step, .. } => {
                Some(step)
            }
            _ => None,
        }
    }
}

/// Handle returned when registering an event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

/// Type for event handlers
///
/// Handlers receive the iterator that emitted the event, already in its
/// post-transition state.
pub type EventHandler = Arc<dyn Fn(&StepIterator, &StepEvent) + Send + Sync>;
