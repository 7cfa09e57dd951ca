//! Per-entity broadcast point for operations.
//!
//! A dispatcher never holds entity collections. It remembers the last
//! operation it saw and fans every new operation out to the listeners
//! attached at the moment of dispatch.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;

use crate::model::Entity;
use crate::store::operation::Operation;

type Listener<T> = Arc<dyn Fn(&Operation<T>) + Send + Sync>;

/// Thread-safe broadcast channel for one entity type.
///
/// Cloning is cheap and yields a handle to the same dispatcher.
/// Listeners are snapshotted when an operation is dispatched
/// (copy-on-notify), so attaching or releasing a subscription from
/// another thread never corrupts an in-progress fan-out.
///
/// Operations are delivered from a single queue: every listener sees
/// them in the order `dispatch` was called, including operations a
/// listener dispatches while it is being notified. No lock is held while
/// listeners run.
pub struct Dispatcher<T: Entity> {
    inner: Arc<DispatcherInner<T>>,
}

impl<T: Entity> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct DispatcherInner<T: Entity> {
    /// Name used in log lines (e.g. "notification").
    name: &'static str,
    listeners: RwLock<Vec<(u64, Listener<T>)>>,
    delivery: Mutex<Delivery<T>>,
    next_listener_id: AtomicU64,
}

/// Operations waiting for fan-out, each with the listeners attached when
/// it was dispatched.
struct Delivery<T: Entity> {
    last_operation: Option<Operation<T>>,
    pending: VecDeque<(Operation<T>, Vec<Listener<T>>)>,
    /// Set while some call to `dispatch` is draining `pending`.
    draining: bool,
}

impl<T: Entity> Dispatcher<T> {
    /// Create a dispatcher with no listeners and no last operation.
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                name,
                listeners: RwLock::new(Vec::new()),
                delivery: Mutex::new(Delivery {
                    last_operation: None,
                    pending: VecDeque::new(),
                    draining: false,
                }),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Record `operation` as the last operation and notify every listener
    /// attached right now, in attachment order.
    ///
    /// If another call is already delivering (a listener dispatching from
    /// its callback, or a concurrent producer), the operation is queued
    /// behind the ones in flight and delivered by that call.
    ///
    /// Fire-and-forget: there is no acknowledgment and no failure path.
    pub fn dispatch(&self, operation: Operation<T>) {
        {
            let mut delivery = self.inner.delivery.lock();
            let listeners: Vec<Listener<T>> = self
                .inner
                .listeners
                .read()
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();

            tracing::debug!(
                dispatcher = self.inner.name,
                kind = %operation.kind(),
                id = ?operation.target_id(),
                listeners = listeners.len(),
                queued = delivery.pending.len(),
                "Dispatching operation"
            );

            delivery.last_operation = Some(operation.clone());
            delivery.pending.push_back((operation, listeners));
            if delivery.draining {
                return;
            }
            delivery.draining = true;
        }

        // A panicking listener must not leave the queue marked as draining.
        let _reset = scopeguard::guard_on_unwind((), |()| {
            self.inner.delivery.lock().draining = false;
        });

        loop {
            let (operation, listeners) = {
                let mut delivery = self.inner.delivery.lock();
                match delivery.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        delivery.draining = false;
                        return;
                    }
                }
            };

            for listener in &listeners {
                listener(&operation);
            }
        }
    }

    /// The most recently dispatched operation, if any.
    pub fn last_operation(&self) -> Option<Operation<T>> {
        self.inner.delivery.lock().last_operation.clone()
    }

    /// Number of attached listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    /// Attach a callback invoked synchronously, on the dispatching thread,
    /// for every operation dispatched from now on.
    ///
    /// The callback stays attached until the returned guard is dropped.
    pub fn subscribe_with<F>(&self, listener: F) -> SubscriptionGuard<T>
    where
        F: Fn(&Operation<T>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.write().push((id, Arc::new(listener)));

        tracing::trace!(dispatcher = self.inner.name, listener = id, "Listener attached");

        SubscriptionGuard {
            id,
            dispatcher: Arc::downgrade(&self.inner),
        }
    }

    /// Attach a queued subscriber.
    ///
    /// Operations are enqueued on the dispatching thread and read by the
    /// owner of the subscription on its own schedule. Operations
    /// dispatched before this call are not replayed.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let guard = self.subscribe_with(move |operation| {
            // Receiver gone means the subscription is being torn down.
            let _ = tx.send(operation.clone());
        });

        Subscription {
            receiver: rx,
            _guard: guard,
        }
    }
}

/// Keeps a listener attached to its dispatcher. Dropping it detaches.
pub struct SubscriptionGuard<T: Entity> {
    id: u64,
    dispatcher: Weak<DispatcherInner<T>>,
}

impl<T: Entity> SubscriptionGuard<T> {
    /// Detach now. Equivalent to dropping the guard.
    pub fn release(self) {}

    /// True while the dispatcher is alive and still holds this listener.
    pub fn is_attached(&self) -> bool {
        self.dispatcher.upgrade().is_some_and(|inner| {
            inner
                .listeners
                .read()
                .iter()
                .any(|(id, _)| *id == self.id)
        })
    }
}

impl<T: Entity> Drop for SubscriptionGuard<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.dispatcher.upgrade() {
            inner.listeners.write().retain(|(id, _)| *id != self.id);
            tracing::trace!(dispatcher = inner.name, listener = self.id, "Listener released");
        }
    }
}

/// Queued subscription returned by [`Dispatcher::subscribe`].
pub struct Subscription<T: Entity> {
    receiver: mpsc::UnboundedReceiver<Operation<T>>,
    _guard: SubscriptionGuard<T>,
}

impl<T: Entity> Subscription<T> {
    /// Wait for the next operation. Returns `None` once the dispatcher is gone.
    pub async fn recv(&mut self) -> Option<Operation<T>> {
        self.receiver.recv().await
    }

    /// Take the next queued operation without waiting.
    pub fn try_recv(&mut self) -> Option<Operation<T>> {
        self.receiver.try_recv().ok()
    }

    /// Detach from the dispatcher.
    pub fn release(self) {}
}
