// ============================================================================
// notify-map - Observer Lists
// Handle-keyed subscriber registries with snapshot broadcast dispatch
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =============================================================================
// SUBSCRIPTION ID
// =============================================================================

/// Opaque handle identifying one subscription on one channel.
///
/// Returned by subscribe calls; pass it back to the matching unsubscribe call
/// to detach. Handles are never reused within a list's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// =============================================================================
// SUBSCRIBER LIST
// =============================================================================

/// A mapping from subscription handle to callback, with broadcast dispatch.
///
/// `emit` iterates a stable snapshot of the subscribers present when dispatch
/// starts: a callback that unsubscribes itself or others mid-dispatch does
/// not corrupt the broadcast, and subscribers removed mid-dispatch still
/// receive the event they were attached for (multicast semantics).
///
/// Callbacks are `Rc<dyn Fn(&A)>`, so no interior borrow is held while a
/// callback runs - a callback may freely subscribe, unsubscribe, or trigger
/// further emits on the same list.
pub struct SubscriberList<A> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(SubscriptionId, Rc<dyn Fn(&A)>)>>,
}

impl<A> SubscriberList<A> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Attach a callback, returning its handle.
    pub fn subscribe(&self, callback: impl Fn(&A) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Detach a callback. Returns true if the handle was attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Number of attached subscribers.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if no subscribers are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Broadcast `arg` to every subscriber attached at the start of dispatch.
    ///
    /// Returns immediately when the list is empty, so mutations with zero
    /// observers skip dispatch cost entirely.
    pub fn emit(&self, arg: &A) {
        if self.is_empty() {
            return;
        }

        // Snapshot before invoking anything: callbacks may mutate the list.
        let snapshot: Vec<Rc<dyn Fn(&A)>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        for callback in snapshot {
            callback(arg);
        }
    }
}

impl<A> Default for SubscriberList<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for SubscriberList<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("len", &self.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
