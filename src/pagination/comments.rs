//! Placement of locally posted comments.
//!
//! Comment lists are grouped by thread (a top-level comment followed by
//! its replies) and chronological within a thread. A freshly posted
//! comment is placed without asking the server where it belongs.

use crate::model::Comment;
use crate::pagination::controller::PaginationController;

/// Index at which `comment` should be inserted into `items`.
///
/// A reply goes right after the last item of its thread: the latest
/// existing reply to the same root, or the root itself when it has no
/// replies yet. A top-level comment, or a reply whose thread is not
/// loaded, goes to the end.
pub fn insertion_index(items: &[Comment], comment: &Comment) -> usize {
    if !comment.is_reply() {
        return items.len();
    }

    let root = comment.thread_root();
    items
        .iter()
        .rposition(|item| item.id == root || (item.is_reply() && item.thread_root() == root))
        .map_or(items.len(), |last| last + 1)
}

impl PaginationController<Comment> {
    /// Insert a comment the local user just posted at its thread position.
    ///
    /// Returns the index it landed at, so the screen can scroll to it.
    pub fn insert_comment(&mut self, comment: Comment) -> usize {
        let index = insertion_index(self.items(), &comment);
        self.insert(comment, index);
        index
    }
}
