//! Typed publish/subscribe channel for engine progress.
//!
//! The engine publishes [`Event`]s while a run is in flight; reporters
//! subscribe to the kinds they render. Listeners run synchronously on the
//! publishing task in attachment order. A listener that fails is logged and
//! skipped so reporting never interrupts the run.
//!
//! Subscribing requires `&mut EventBus` while publishing only needs
//! `&EventBus`, so once a run borrows the bus no further listeners can be
//! attached mid-flight.

use std::collections::BTreeMap;
use std::fmt;

/// Error type returned by listeners.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type returned by listeners.
pub type ListenerResult = Result<(), ListenerError>;

type Listener = Box<dyn Fn(&Event) -> ListenerResult + Send + Sync>;

/// Tag identifying the kind of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A feature started.
    Feature,
    /// A scenario started.
    Scenario,
    /// A step is about to execute.
    Step,
    /// A step failed.
    StepFail,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::Feature, Self::Scenario, Self::Step, Self::StepFail];

    /// Wire name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Scenario => "scenario",
            Self::Step => "step",
            Self::StepFail => "step:fail",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of [`Event::Feature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureEvent {
    /// Feature title.
    pub title: String,
}

/// Payload of [`Event::Scenario`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEvent {
    /// Scenario title.
    pub title: String,
    /// Annotations attached to the scenario.
    pub annotations: BTreeMap<String, String>,
}

/// Payload of [`Event::Step`] and [`Event::StepFail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    /// Human-readable step description.
    pub step: String,
}

/// Progress notification published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Tagged `feature`.
    Feature(FeatureEvent),
    /// Tagged `scenario`.
    Scenario(ScenarioEvent),
    /// Tagged `step`.
    Step(StepEvent),
    /// Tagged `step:fail`.
    StepFail(StepEvent),
}

impl Event {
    /// Tag of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Feature(_) => EventKind::Feature,
            Self::Scenario(_) => EventKind::Scenario,
            Self::Step(_) => EventKind::Step,
            Self::StepFail(_) => EventKind::StepFail,
        }
    }
}

/// Handle identifying one attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    listener: Listener,
}

/// Synchronous event bus with typed subscriptions.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create a bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for features starting.
    pub fn on_feature<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&FeatureEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe(EventKind::Feature, move |event| match event {
            Event::Feature(payload) => listener(payload),
            _ => Ok(()),
        })
    }

    /// Listen for scenarios starting.
    pub fn on_scenario<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&ScenarioEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe(EventKind::Scenario, move |event| match event {
            Event::Scenario(payload) => listener(payload),
            _ => Ok(()),
        })
    }

    /// Listen for steps about to execute.
    pub fn on_step<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StepEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe(EventKind::Step, move |event| match event {
            Event::Step(payload) => listener(payload),
            _ => Ok(()),
        })
    }

    /// Listen for failing steps.
    pub fn on_step_fail<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&StepEvent) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe(EventKind::StepFail, move |event| match event {
            Event::StepFail(payload) => listener(payload),
            _ => Ok(()),
        })
    }

    fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&Event) -> ListenerResult + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            listener: Box::new(listener),
        });
        id
    }

    /// Detach a listener. Returns `false` if it was not attached.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of listeners attached to `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    /// `true` when no listener is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Deliver `event` to every listener of its kind.
    ///
    /// Listener errors are logged and dropped.
    pub fn emit(&self, event: &Event) {
        let kind = event.kind();
        for subscription in self.subscriptions.iter().filter(|s| s.kind == kind) {
            if let Err(e) = (subscription.listener)(event) {
                tracing::warn!(event = %kind, error = %e, "Event listener failed");
            }
        }
    }
}
