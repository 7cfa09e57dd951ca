//! Domain shortcuts that build a snapshot and route it through
//! [`Dispatcher::dispatch`].

use crate::model::{LikeResponse, Notification, Post, UserProfile};
use crate::store::dispatcher::Dispatcher;
use crate::store::operation::Operation;

impl Dispatcher<Notification> {
    /// Broadcast that the user opened (or un-opened) a notification.
    pub fn dispatch_checked(&self, notification: &Notification, is_checked: bool) {
        self.dispatch(Operation::Edit(notification.with_checked(is_checked)));
    }
}

impl Dispatcher<Post> {
    /// Broadcast the like state confirmed by the server.
    pub fn dispatch_like(&self, post: &Post, response: LikeResponse) {
        self.dispatch(Operation::Edit(post.with_like(response)));
    }

    /// Broadcast a post the local user just published.
    pub fn dispatch_created(&self, post: Post) {
        self.dispatch(Operation::Insert(post));
    }

    /// Broadcast that a post was removed.
    pub fn dispatch_deleted(&self, post_id: u64) {
        self.dispatch(Operation::Delete(post_id));
    }
}

impl Dispatcher<UserProfile> {
    /// Broadcast the signed-in user's profile after it was loaded or updated.
    pub fn dispatch_profile(&self, profile: UserProfile) {
        self.dispatch(Operation::Edit(profile));
    }

    /// Profile carried by the last insert or edit.
    ///
    /// `None` before the first profile dispatch and after a delete.
    pub fn current_profile(&self) -> Option<UserProfile> {
        match self.last_operation()? {
            Operation::Insert(profile) | Operation::Edit(profile) => Some(profile),
            Operation::Delete(_) => None,
        }
    }
}
