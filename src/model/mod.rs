//! Domain entities shared between screens.
//!
//! Every entity is an immutable snapshot with a stable identifier.
//! "Changing" an entity means building a new snapshot that carries
//! the same id and dispatching it through the store.

mod comment;
mod notification;
mod post;
mod user;

use std::fmt::Debug;
use std::hash::Hash;

pub use comment::Comment;
pub use notification::Notification;
pub use post::{LikeResponse, Post};
pub use user::{User, UserProfile};

/// Identity contract consumed by the store and the pagination engine.
///
/// Two snapshots with equal `id()` describe the same record; the newer
/// snapshot replaces the older one wherever it is materialized.
pub trait Entity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Identifier type. Must be stable for the lifetime of the record.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Returns the stable identifier of this snapshot.
    fn id(&self) -> Self::Id;
}
