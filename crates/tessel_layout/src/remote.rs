//! Cross-thread access to a tree
//!
//! The tree itself is single-threaded. Other threads (asset loaders, network
//! callbacks) influence it only through a [`RemoteHandle`], whose queued
//! operations the owning thread applies at the start of its next update.

use std::sync::mpsc::Sender;

use crate::deferred::{DeferredCallback, DeferredHandle, DeferredPhase};
use crate::element::Element;
use crate::tree::UiTree;

/// Operation queued from another thread
pub enum RemoteOp {
    AddChild {
        parent_id: String,
        element: Element,
    },
    RemoveChild {
        id: String,
    },
    Defer {
        phase: DeferredPhase,
        delay: f64,
        handle: DeferredHandle,
        callback: DeferredCallback,
    },
}

impl std::fmt::Debug for RemoteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteOp::AddChild { parent_id, element } => f
                .debug_struct("AddChild")
                .field("parent_id", parent_id)
                .field("element", &element.id())
                .finish(),
            RemoteOp::RemoveChild { id } => f.debug_struct("RemoveChild").field("id", id).finish(),
            RemoteOp::Defer { phase, delay, .. } => f
                .debug_struct("Defer")
                .field("phase", phase)
                .field("delay", delay)
                .finish(),
        }
    }
}

/// `Send + Clone` handle queuing operations for a tree.
///
/// Sends silently fail once the tree is dropped; each method reports whether
/// the operation was queued.
#[derive(Clone, Debug)]
pub struct RemoteHandle {
    sender: Sender<RemoteOp>,
}

impl RemoteHandle {
    pub(crate) fn new(sender: Sender<RemoteOp>) -> Self {
        Self { sender }
    }

    /// Attach `element` under the element with id `parent_id`
    pub fn add_child(&self, parent_id: impl Into<String>, element: Element) -> bool {
        self.send(RemoteOp::AddChild {
            parent_id: parent_id.into(),
            element,
        })
    }

    /// Detach the element with id `id` and its subtree
    pub fn remove_child(&self, id: impl Into<String>) -> bool {
        self.send(RemoteOp::RemoveChild { id: id.into() })
    }

    /// Queue a deferred callback; the handle can cancel it from any thread
    pub fn defer<F>(&self, phase: DeferredPhase, delay: f64, callback: F) -> DeferredHandle
    where
        F: FnOnce(&mut UiTree) + Send + 'static,
    {
        let handle = DeferredHandle::new();
        self.send(RemoteOp::Defer {
            phase,
            delay,
            handle: handle.clone(),
            callback: Box::new(callback),
        });
        handle
    }

    fn send(&self, op: RemoteOp) -> bool {
        self.sender.send(op).is_ok()
    }
}
