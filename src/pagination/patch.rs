//! In-place list edits that keep ids unique.

use std::collections::HashSet;

use crate::model::Entity;
use crate::store::Operation;

pub fn position<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| &item.id() == id)
}

/// Apply a dispatched operation.
///
/// `Insert` of a known id replaces in place; otherwise it goes to the
/// front (dispatched entities are the newest). `Edit` and `Delete` of an
/// unknown id do nothing.
pub fn apply<T: Entity>(items: &mut Vec<T>, operation: Operation<T>) {
    match operation {
        Operation::Insert(entity) => insert_at(items, entity, 0),
        Operation::Edit(entity) => {
            if let Some(index) = position(items, &entity.id()) {
                items[index] = entity;
            }
        }
        Operation::Delete(id) => {
            if let Some(index) = position(items, &id) {
                items.remove(index);
            }
        }
    }
}

/// Insert at `index` (clamped to the list length), or replace in place if
/// the id is already present.
pub fn insert_at<T: Entity>(items: &mut Vec<T>, entity: T, index: usize) {
    match position(items, &entity.id()) {
        Some(existing) => items[existing] = entity,
        None => items.insert(index.min(items.len()), entity),
    }
}

/// Append entities whose ids are not yet present. Returns how many were added.
pub fn append_unique<T: Entity>(items: &mut Vec<T>, incoming: Vec<T>) -> usize {
    let mut seen: HashSet<T::Id> = items.iter().map(Entity::id).collect();
    let before = items.len();
    items.extend(incoming.into_iter().filter(|entity| seen.insert(entity.id())));
    items.len() - before
}

/// Keep the first occurrence of every id.
pub fn dedup_by_id<T: Entity>(incoming: Vec<T>) -> Vec<T> {
    let mut items = Vec::with_capacity(incoming.len());
    append_unique(&mut items, incoming);
    items
}
