//! Mutation intents broadcast by dispatchers.

use std::fmt;

use crate::model::Entity;

/// Tag of an [`Operation`], useful for logging and matching without
/// borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Insert,
    Edit,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Insert => write!(f, "insert"),
            OperationKind::Edit => write!(f, "edit"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// A single mutation applied to every list holding the affected entity.
///
/// The id carried by the operation (the entity's id, or the bare id for
/// `Delete`) is what lists match against.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<T: Entity> {
    /// A newly created entity. Lists that already hold the id treat this as `Edit`.
    Insert(T),
    /// A new snapshot of an existing entity.
    Edit(T),
    /// The entity with this id no longer exists.
    Delete(T::Id),
}

impl<T: Entity> Operation<T> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Insert(_) => OperationKind::Insert,
            Operation::Edit(_) => OperationKind::Edit,
            Operation::Delete(_) => OperationKind::Delete,
        }
    }

    /// Id used to match this operation against list contents.
    pub fn target_id(&self) -> T::Id {
        match self {
            Operation::Insert(entity) | Operation::Edit(entity) => entity.id(),
            Operation::Delete(id) => id.clone(),
        }
    }

    /// The carried snapshot, if any.
    pub fn entity(&self) -> Option<&T> {
        match self {
            Operation::Insert(entity) | Operation::Edit(entity) => Some(entity),
            Operation::Delete(_) => None,
        }
    }
}
