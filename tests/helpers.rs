//! Test utility functions for stepper
#![allow(dead_code)]

use stepper::core::config::WizardConfig;
use stepper::core::{EventKind, Step, StepEvent, StepIterator, Transition, Wizard};
use stepper::render::{create_renderer, Layout, SharedBuffer, Theme};
use stepper::session::{Action, ActionSource, SessionOutcome, WizardSession};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Four-step checkout used across scenarios
pub const CHECKOUT_YAML: &str = r#"
name: "Checkout"
steps:
  - id: "cart"
    caption: "Cart"
    description: "Review your items"
    editable: true
  - id: "shipping"
    caption: "Shipping"
    description: "Where should we send it?"
  - id: "gift"
    caption: "Gift wrap"
    optional: true
  - id: "payment"
    caption: "Payment"
    cancellable: true
"#;

/// Build a wizard from YAML
pub fn wizard(yaml: &str) -> Wizard {
    WizardConfig::from_yaml(yaml)
        .and_then(|config| config.to_wizard())
        .unwrap()
}

/// Build a wizard from YAML with the navigation policy overridden
pub fn wizard_with_policy(yaml: &str, linear: bool) -> Wizard {
    let mut wizard = wizard(yaml);
    wizard.iterator.set_linear(linear);
    wizard
}

/// Look up a configured step
pub fn step(wizard: &Wizard, id: &str) -> Step {
    wizard
        .index
        .get(id)
        .cloned()
        .unwrap_or_else(|| panic!("no step '{}'", id))
}

/// Configured id of the current step
pub fn current_id(wizard: &Wizard) -> Option<String> {
    wizard
        .iterator
        .current()
        .and_then(|s| wizard.index.id_of(s))
        .map(str::to_string)
}

/// Complete the current step and advance, the way a user pressing "next" does
pub fn complete_and_next(wizard: &mut Wizard) {
    let current = wizard.iterator.current().cloned().expect("no current step");
    current.fire_complete();
    if !wizard.iterator.is_complete() {
        wizard.iterator.next().unwrap();
    }
}

/// A recorded event with captions instead of handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub kind: EventKind,
    pub transition: Option<Transition>,
    pub previous: Option<String>,
    pub current: Option<String>,
}

/// Events recorded from an iterator
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl EventLog {
    pub fn attach(iterator: &mut StepIterator) -> Self {
        let log = Self::default();
        let sink = log.events.clone();
        iterator.add_event_handler(move |_, event: &StepEvent| {
            let (previous, current) = match event {
                StepEvent::ElementAdded { step, .. } => (None, Some(step.caption())),
                StepEvent::ElementRemoved { step, .. } => (Some(step.caption()), None),
                _ => (
                    event.previous().map(Step::caption),
                    event.current().map(Step::caption),
                ),
            };
            sink.lock().unwrap().push(Recorded {
                kind: event.kind(),
                transition: event.transition(),
                previous,
                current,
            });
        });
        log
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<EventKind> {
        self.events().into_iter().map(|e| e.kind).collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// Scripted action source that counts how often it was polled
pub struct MockActions {
    actions: VecDeque<Action>,
    polled: Arc<AtomicUsize>,
}

impl MockActions {
    pub fn new(script: &[&str]) -> Self {
        Self {
            actions: script.iter().map(|s| s.parse().unwrap()).collect(),
            polled: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn polled(&self) -> Arc<AtomicUsize> {
        self.polled.clone()
    }
}

#[async_trait]
impl ActionSource for MockActions {
    async fn next_action(&mut self) -> anyhow::Result<Option<Action>> {
        self.polled.fetch_add(1, Ordering::SeqCst);
        Ok(self.actions.pop_front())
    }
}

/// Result of a scripted session
pub struct SessionResult {
    pub outcome: SessionOutcome,
    pub output: String,
    pub polled: usize,
}

impl SessionResult {
    /// `(from, to)` pairs of every transition
    pub fn moves(&self) -> Vec<(Option<String>, Option<String>)> {
        self.outcome
            .transitions
            .iter()
            .map(|t| (t.from.clone(), t.to.clone()))
            .collect()
    }
}

/// Run a wizard session against a script, rendering into a buffer
pub async fn run_session(wizard: Wizard, layout: Layout, script: &[&str]) -> SessionResult {
    let buffer = SharedBuffer::new();
    let renderer = create_renderer(layout, Theme::default(), Box::new(buffer.clone()));
    let mut session = WizardSession::new(wizard, renderer);

    let mut source = MockActions::new(script);
    let polled = source.polled();
    let outcome = session.run(&mut source).await.unwrap();

    SessionResult {
        outcome,
        output: console::strip_ansi_codes(&buffer.contents()).to_string(),
        polled: polled.load(Ordering::SeqCst),
    }
}

/// Shorthand for `Some(id.to_string())`
pub fn id(id: &str) -> Option<String> {
    Some(id.to_string())
}
