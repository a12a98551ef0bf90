//! Deferred callbacks
//!
//! Callbacks queued for after the next layout, update or render. Entries fire
//! at the start of the matching phase once the tree clock has reached their
//! fire time, ordered by fire time and then by insertion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::tree::UiTree;

/// Phase a deferred callback is drained in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredPhase {
    PostLayout,
    PostUpdate,
    PostRender,
}

/// Callback run on the owning thread with the tree
pub type DeferredCallback = Box<dyn FnOnce(&mut UiTree) + Send>;

/// Cancellation token for a queued callback.
///
/// Cancelling is idempotent and a no-op once the callback has run.
#[derive(Clone, Debug, Default)]
pub struct DeferredHandle {
    cancelled: Arc<AtomicBool>,
}

impl DeferredHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct Entry {
    fire_at: f64,
    seq: u64,
    handle: DeferredHandle,
    callback: DeferredCallback,
}

/// Time-ordered callback queue for one phase
#[derive(Default)]
pub struct DeferredQueue {
    entries: Vec<Entry>,
    next_seq: u64,
    needs_sort: bool,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `callback` to fire at `fire_at` (tree clock seconds)
    pub fn push(&mut self, fire_at: f64, handle: DeferredHandle, callback: DeferredCallback) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            fire_at,
            seq,
            handle,
            callback,
        });
        self.needs_sort = true;
    }

    /// Remove and return every due, uncancelled callback in firing order
    pub fn take_due(&mut self, now: f64) -> Vec<DeferredCallback> {
        if self.needs_sort {
            self.entries
                .sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
            self.needs_sort = false;
        }

        let due = self.entries.partition_point(|entry| entry.fire_at <= now);
        self.entries
            .drain(..due)
            .filter(|entry| !entry.handle.is_cancelled())
            .map(|entry| entry.callback)
            .collect()
    }

    /// Queued entries, cancelled ones included until they come due
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("len", &self.entries.len())
            .field("needs_sort", &self.needs_sort)
            .finish()
    }
}

/// One queue per phase
#[derive(Debug, Default)]
pub struct DeferredQueues {
    post_layout: DeferredQueue,
    post_update: DeferredQueue,
    post_render: DeferredQueue,
}

impl DeferredQueues {
    pub fn get_mut(&mut self, phase: DeferredPhase) -> &mut DeferredQueue {
        match phase {
            DeferredPhase::PostLayout => &mut self.post_layout,
            DeferredPhase::PostUpdate => &mut self.post_update,
            DeferredPhase::PostRender => &mut self.post_render,
        }
    }

    pub fn get(&self, phase: DeferredPhase) -> &DeferredQueue {
        match phase {
            DeferredPhase::PostLayout => &self.post_layout,
            DeferredPhase::PostUpdate => &self.post_update,
            DeferredPhase::PostRender => &self.post_render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> DeferredCallback {
        Box::new(|_tree: &mut UiTree| {})
    }

    #[test]
    fn test_takes_only_due_entries() {
        let mut queue = DeferredQueue::new();
        queue.push(2.0, DeferredHandle::new(), noop());
        queue.push(1.0, DeferredHandle::new(), noop());
        queue.push(1.0, DeferredHandle::new(), noop());

        assert!(queue.take_due(0.5).is_empty());
        assert_eq!(queue.take_due(1.0).len(), 2);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take_due(5.0).len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancelled_entries_are_dropped() {
        let mut queue = DeferredQueue::new();
        let handle = DeferredHandle::new();
        queue.push(0.0, handle.clone(), noop());
        handle.cancel();
        handle.cancel();

        assert!(handle.is_cancelled());
        assert!(queue.take_due(1.0).is_empty());
        assert!(queue.is_empty());
    }
}
