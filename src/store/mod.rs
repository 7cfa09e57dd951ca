//! Cross-screen consistency layer.
//!
//! Any component that mutates an entity dispatches an [`Operation`] to the
//! entity type's [`Dispatcher`]. Every bound pagination controller patches
//! its own copy of the list; the store itself never holds lists.

mod dispatcher;
mod helpers;
mod operation;
mod registry;

pub use dispatcher::{Dispatcher, Subscription, SubscriptionGuard};
pub use operation::{Operation, OperationKind};
pub use registry::{Store, StoreEntity};
