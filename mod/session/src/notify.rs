//! Change-notification registry.
//!
//! Replaces an ambient broadcast event with an explicit subscription
//! interface the host wires up. Handlers carry no payload; subscribers
//! re-read the directory on notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Identifier returned by `subscribe`, used to unsubscribe later.
pub type SubscriptionId = u64;

/// Callback invoked on each notification. Runs synchronously on the
/// notifying thread.
pub type ChangeHandler = Arc<dyn Fn() + Send + Sync>;

/// Registry of change handlers, notified in subscription order.
#[derive(Default)]
pub(crate) struct ChangeListeners {
    handlers: RwLock<Vec<(SubscriptionId, ChangeHandler)>>,
    next_id: AtomicU64,
}

impl ChangeListeners {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Returns its subscription id.
    pub(crate) fn subscribe(&self, handler: ChangeHandler) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.write().unwrap().push((id, handler));
        id
    }

    /// Remove a handler. Returns false if the id was not registered.
    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write().unwrap();
        let before = handlers.len();
        handlers.retain(|(entry_id, _)| *entry_id != id);
        handlers.len() != before
    }

    /// Invoke every registered handler once.
    pub(crate) fn notify(&self) {
        // Clone out of the lock so a handler may subscribe/unsubscribe.
        let snapshot: Vec<ChangeHandler> = self
            .handlers
            .read()
            .unwrap()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in snapshot {
            handler();
        }
    }
}
