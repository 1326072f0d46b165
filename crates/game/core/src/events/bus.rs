//! Synchronous publish/subscribe hub.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::types::{Event, EventKind};

type Handler = Rc<dyn Fn(&Event<'_>)>;

/// Handle returned by [`EventBus::subscribe`], used to remove the handler again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    kind: EventKind,
    id: u64,
}

impl SubscriptionToken {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

struct Subscriber {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    topics: HashMap<EventKind, Vec<Subscriber>>,
}

impl Registry {
    fn contains(&self, kind: EventKind, id: u64) -> bool {
        self.topics
            .get(&kind)
            .is_some_and(|subscribers| subscribers.iter().any(|s| s.id == id))
    }
}

/// Event bus shared by the combat model and the reactive systems.
///
/// Cloning the bus yields another handle to the same registry. Emission is
/// synchronous: handlers run inline, in subscription order, on the caller's
/// stack. A handler may emit again (re-entrancy); the registry is never
/// borrowed while handlers run. Handlers subscribed during an emission only
/// see later emissions, and handlers unsubscribed during an emission are not
/// invoked for the rest of it.
///
/// A handler that needs to emit should capture a [`WeakEventBus`] rather than
/// a clone, otherwise the handler keeps its own registry alive.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionToken
    where
        F: Fn(&Event<'_>) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.topics.entry(kind).or_default().push(Subscriber {
            id,
            handler: Rc::new(handler),
        });
        tracing::trace!(event = %kind, id, "subscribed");
        SubscriptionToken { kind, id }
    }

    /// Removes exactly the handler behind `token`.
    ///
    /// Returns false if it was already removed (or never registered here).
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(subscribers) = registry.topics.get_mut(&token.kind) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.id != token.id);
        before != subscribers.len()
    }

    /// Invokes every current handler for the event's kind.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &Event<'_>) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(u64, Handler)> = {
            let registry = self.registry.borrow();
            match registry.topics.get(&kind) {
                Some(subscribers) => subscribers
                    .iter()
                    .map(|s| (s.id, Rc::clone(&s.handler)))
                    .collect(),
                None => return 0,
            }
        };

        let mut invoked = 0;
        for (id, handler) in snapshot {
            if !self.registry.borrow().contains(kind, id) {
                continue;
            }
            handler(event);
            invoked += 1;
        }
        tracing::trace!(event = %kind, invoked, "emitted");
        invoked
    }

    /// Drops every subscription for every kind.
    pub fn clear(&self) {
        self.registry.borrow_mut().topics.clear();
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .topics
            .get(&kind)
            .map_or(0, Vec::len)
    }

    pub fn downgrade(&self) -> WeakEventBus {
        WeakEventBus {
            registry: Rc::downgrade(&self.registry),
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut map = f.debug_map();
        for (kind, subscribers) in &registry.topics {
            map.entry(kind, &subscribers.len());
        }
        map.finish()
    }
}

/// Non-owning handle to an [`EventBus`], for handlers that emit.
#[derive(Clone, Default)]
pub struct WeakEventBus {
    registry: Weak<RefCell<Registry>>,
}

impl WeakEventBus {
    pub fn upgrade(&self) -> Option<EventBus> {
        self.registry.upgrade().map(|registry| EventBus { registry })
    }
}
