//! Per-document change event relay.
//!
//! Subscribers run synchronously in registration order. They see the store
//! read-only, so a callback cannot start a nested mutation.

use crate::models::{Change, TextStore};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`EventBus::register`]; pass it back to unregister.
    pub struct SubscriptionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BeforeChange,
    AfterChange,
    Changed,
    Reloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEvent {
    BeforeChange,
    AfterChange,
    Changed(Change),
    Reloaded,
}

impl BufferEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BufferEvent::BeforeChange => EventKind::BeforeChange,
            BufferEvent::AfterChange => EventKind::AfterChange,
            BufferEvent::Changed(_) => EventKind::Changed,
            BufferEvent::Reloaded => EventKind::Reloaded,
        }
    }

    /// Payload for the rendering side: the change, or `None` on reload.
    pub fn change(&self) -> Option<&Change> {
        match self {
            BufferEvent::Changed(change) => Some(change),
            _ => None,
        }
    }
}

pub type Subscriber = Box<dyn FnMut(&BufferEvent, &TextStore)>;

struct Subscription {
    kind: EventKind,
    callback: Subscriber,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    order: FxHashMap<EventKind, Vec<SubscriptionId>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&BufferEvent, &TextStore) + 'static,
    ) -> SubscriptionId {
        let id = self.subscriptions.insert(Subscription {
            kind,
            callback: Box::new(callback),
        });
        self.order.entry(kind).or_default().push(id);
        id
    }

    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        let Some(sub) = self.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = self.order.get_mut(&sub.kind) {
            ids.retain(|other| *other != id);
        }
        true
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.order.get(&kind).map(Vec::len).unwrap_or(0)
    }

    pub fn emit(&mut self, event: &BufferEvent, store: &TextStore) {
        let Some(ids) = self.order.get(&event.kind()) else {
            return;
        };
        for id in ids {
            if let Some(sub) = self.subscriptions.get_mut(*id) {
                (sub.callback)(event, store);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/bus.rs"]
mod tests;
