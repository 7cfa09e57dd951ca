//! Subscription that feeds a dispatcher's operations into a controller.

use tokio::sync::mpsc;

use crate::model::Entity;
use crate::pagination::intent::PaginationIntent;
use crate::store::{Dispatcher, SubscriptionGuard};

/// Sending half of a controller's message queue.
///
/// Fetch tasks and bindings post here from any thread; the controller
/// applies messages on its owner's thread in arrival order.
pub(crate) struct Mailbox<T: Entity> {
    tx: mpsc::UnboundedSender<PaginationIntent<T>>,
}

impl<T: Entity> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Entity> Mailbox<T> {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<PaginationIntent<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a message. Returns false if the controller is gone.
    pub(crate) fn post(&self, intent: PaginationIntent<T>) -> bool {
        self.tx.send(intent).is_ok()
    }
}

/// Live link between a dispatcher and one controller's list.
///
/// Dropping it stops delivery.
pub struct Binding<T: Entity> {
    dispatcher: &'static str,
    guard: SubscriptionGuard<T>,
}

impl<T: Entity> Binding<T> {
    /// Name of the bound dispatcher.
    pub fn dispatcher(&self) -> &'static str {
        self.dispatcher
    }

    /// True while the dispatcher still delivers to this binding.
    pub fn is_attached(&self) -> bool {
        self.guard.is_attached()
    }
}

pub(crate) fn bind<T: Entity>(dispatcher: &Dispatcher<T>, mailbox: Mailbox<T>) -> Binding<T> {
    let name = dispatcher.name();
    let guard = dispatcher.subscribe_with(move |operation| {
        if !mailbox.post(PaginationIntent::Apply(operation.clone())) {
            tracing::trace!(dispatcher = name, "Bound controller already gone");
        }
    });

    Binding {
        dispatcher: name,
        guard,
    }
}
