//! UI events and listener dispatch
//!
//! Interaction events are collected while an input or update call walks the
//! tree and dispatched once the walk is done, so listeners never observe a
//! half-applied transition.

use rustc_hash::FxHashMap;

use crate::node::NodeId;

/// Event kinds listeners can register for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    HoverBegin,
    HoverEnd,
    ActionBegin,
    ActionEnd,
    /// Checkbox checked state flipped
    Toggled,
    /// Slider value changed through input
    ValueChanged,
    Scrolled,
    TabChanged,
}

/// Event payload
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventData {
    None,
    Toggled(bool),
    Value(f32),
    Scroll { x: f32, y: f32 },
    Tab(usize),
}

/// A dispatched UI event
#[derive(Clone, Debug, PartialEq)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub target: NodeId,
    pub element_id: String,
    pub data: EventData,
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&UiEvent) + Send + Sync>;

/// Listener registry keyed by node and event kind
#[derive(Default)]
pub struct EventDispatcher {
    handlers: FxHashMap<(NodeId, UiEventKind), Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler for a node and event kind
    pub fn register<F>(&mut self, target: NodeId, kind: UiEventKind, handler: F)
    where
        F: Fn(&UiEvent) + Send + Sync + 'static,
    {
        self.handlers
            .entry((target, kind))
            .or_default()
            .push(Box::new(handler));
    }

    /// Call every handler registered for the event's target and kind
    pub fn dispatch(&self, event: &UiEvent) {
        if let Some(handlers) = self.handlers.get(&(event.target, event.kind)) {
            for handler in handlers {
                handler(event);
            }
        }
    }

    /// Drop every handler of a destroyed node
    pub fn remove_node(&mut self, target: NodeId) {
        self.handlers.retain(|(node, _), _| *node != target);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn test_dispatch_by_target_and_kind() {
        let mut ids: SlotMap<NodeId, ()> = SlotMap::with_key();
        let (a, b) = (ids.insert(()), ids.insert(()));

        let count = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::new();
        let counter = Arc::clone(&count);
        dispatcher.register(a, UiEventKind::HoverBegin, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let event = |target, kind| UiEvent {
            kind,
            target,
            element_id: String::new(),
            data: EventData::None,
        };
        dispatcher.dispatch(&event(a, UiEventKind::HoverBegin));
        dispatcher.dispatch(&event(a, UiEventKind::HoverEnd));
        dispatcher.dispatch(&event(b, UiEventKind::HoverBegin));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        dispatcher.remove_node(a);
        assert_eq!(dispatcher.handler_count(), 0);
    }
}
