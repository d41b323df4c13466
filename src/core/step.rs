//! Step domain model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Identity of a step
///
/// Steps are compared by identity, never by their attributes. Two steps
/// with the same caption are still different steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepId(Uuid);

impl StepId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Mutable attributes of a step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepAttributes {
    /// Short label shown in the step bar
    pub caption: String,

    /// Longer text shown below the caption
    pub description: Option<String>,

    /// The step may be skipped
    pub optional: bool,

    /// The step may be re-entered after it was completed
    pub editable: bool,

    /// The step can never be navigated to
    pub disabled: bool,

    /// The step offers a cancel action
    pub cancellable: bool,
}

/// Handle to a signal subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Listener invoked with the step that fired the signal
pub type StepListener = Arc<dyn Fn(&Step) + Send + Sync>;

#[derive(Default)]
struct Signal {
    listeners: Vec<(SubscriptionId, StepListener)>,
}

impl Signal {
    fn subscribe(&mut self, listener: StepListener) -> SubscriptionId {
        let id = SubscriptionId(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed));
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn snapshot(&self) -> Vec<StepListener> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

struct StepInner {
    id: StepId,
    attributes: RwLock<StepAttributes>,
    complete: Mutex<Signal>,
    reset: Mutex<Signal>,
}

/// A single unit of wizard progress
///
/// `Step` is a cheap, cloneable handle. Clones share attributes and
/// signals, so a step configured by the caller and then added to an
/// iterator stays live: changing `disabled` after the fact is seen by
/// the next transition check.
#[derive(Clone)]
pub struct Step {
    inner: Arc<StepInner>,
}

impl Step {
    /// Create a step with the given caption and default attributes
    pub fn new(caption: impl Into<String>) -> Self {
        Self::from_attributes(StepAttributes {
            caption: caption.into(),
            ..StepAttributes::default()
        })
    }

    /// Create a step from a full attribute set
    pub fn from_attributes(attributes: StepAttributes) -> Self {
        Self {
            inner: Arc::new(StepInner {
                id: StepId::new(),
                attributes: RwLock::new(attributes),
                complete: Mutex::new(Signal::default()),
                reset: Mutex::new(Signal::default()),
            }),
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.set_description(Some(description.into()));
        self
    }

    pub fn with_optional(self, optional: bool) -> Self {
        self.set_optional(optional);
        self
    }

    pub fn with_editable(self, editable: bool) -> Self {
        self.set_editable(editable);
        self
    }

    pub fn with_disabled(self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn with_cancellable(self, cancellable: bool) -> Self {
        self.set_cancellable(cancellable);
        self
    }

    pub fn id(&self) -> StepId {
        self.inner.id
    }

    /// Snapshot of the current attributes
    pub fn attributes(&self) -> StepAttributes {
        self.read().clone()
    }

    pub fn caption(&self) -> String {
        self.read().caption.clone()
    }

    pub fn description(&self) -> Option<String> {
        self.read().description.clone()
    }

    pub fn is_optional(&self) -> bool {
        self.read().optional
    }

    pub fn is_editable(&self) -> bool {
        self.read().editable
    }

    pub fn is_disabled(&self) -> bool {
        self.read().disabled
    }

    pub fn is_cancellable(&self) -> bool {
        self.read().cancellable
    }

    pub fn set_caption(&self, caption: impl Into<String>) {
        self.write().caption = caption.into();
    }

    pub fn set_description(&self, description: Option<String>) {
        self.write().description = description;
    }

    pub fn set_optional(&self, optional: bool) {
        self.write().optional = optional;
    }

    pub fn set_editable(&self, editable: bool) {
        self.write().editable = editable;
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.write().disabled = disabled;
    }

    pub fn set_cancellable(&self, cancellable: bool) {
        self.write().cancellable = cancellable;
    }

    /// Register a listener for the complete signal
    pub fn on_complete<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Step) + Send + Sync + 'static,
    {
        lock(&self.inner.complete).subscribe(Arc::new(listener))
    }

    /// Register a listener for the reset signal
    pub fn on_reset<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Step) + Send + Sync + 'static,
    {
        lock(&self.inner.reset).subscribe(Arc::new(listener))
    }

    /// Remove a complete or reset listener. Returns `false` if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.inner.complete).unsubscribe(id) || lock(&self.inner.reset).unsubscribe(id)
    }

    /// Signal that the user finished this step
    pub fn fire_complete(&self) {
        let listeners = lock(&self.inner.complete).snapshot();
        for listener in listeners {
            listener(self);
        }
    }

    /// Signal that this step's progress is no longer valid
    pub fn fire_reset(&self) {
        let listeners = lock(&self.inner.reset).snapshot();
        for listener in listeners {
            listener(self);
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StepAttributes> {
        self.inner.attributes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StepAttributes> {
        self.inner.attributes.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn lock(signal: &Mutex<Signal>) -> MutexGuard<'_, Signal> {
    signal.lock().unwrap_or_else(|e| e.into_inner())
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Step {}

impl std::hash::Hash for Step {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes = self.read();
        f.debug_struct("Step")
            .field("id", &self.inner.id)
            .field("caption", &attributes.caption)
            .field("optional", &attributes.optional)
            .field("editable", &attributes.editable)
            .field("disabled", &attributes.disabled)
            .finish()
    }
}
