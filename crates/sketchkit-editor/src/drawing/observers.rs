//! Synchronous observer fan-out for drawing events.
//!
//! Notification runs on the calling thread, in call order, over a
//! point-in-time snapshot of the subscription set: a handler that attaches
//! or detaches observers while being notified never causes skipped or
//! duplicated deliveries, and never invalidates the iteration.

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::events::{DrawingEvent, DrawingEventKind};

/// Subscription handle for detaching an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event kinds.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these kinds.
    Kinds(Vec<DrawingEventKind>),
}

impl EventFilter {
    /// Check if an event matches this filter.
    pub fn matches(&self, event: &DrawingEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kinds(kinds) => kinds.contains(&event.kind()),
        }
    }
}

type EventHandler = Rc<dyn Fn(&DrawingEvent)>;

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

/// The attached-observer set for a drawing.
#[derive(Default)]
pub struct ObserverRegistry {
    subscriptions: RefCell<Vec<Subscription>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an observer for every event kind.
    pub fn subscribe(&self, handler: impl Fn(&DrawingEvent) + 'static) -> SubscriptionId {
        self.subscribe_filtered(EventFilter::All, handler)
    }

    /// Attaches an observer for the event kinds selected by `filter`.
    pub fn subscribe_filtered(
        &self,
        filter: EventFilter,
        handler: impl Fn(&DrawingEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscriptions.borrow_mut().push(Subscription {
            id,
            filter,
            handler: Rc::new(handler),
        });
        id
    }

    /// Detaches an observer. Returns false if the id was not attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscriptions.borrow_mut();
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Delivers `event` to every matching observer attached at the moment of
    /// the call. The borrow is released before any handler runs, so handlers
    /// may attach or detach freely.
    pub fn notify(&self, event: &DrawingEvent) {
        let snapshot: Vec<Subscription> = self.subscriptions.borrow().clone();
        for sub in snapshot {
            if sub.filter.matches(event) {
                (sub.handler)(event);
            }
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observer_count())
            .finish()
    }
}
