//! Explicitly constructed registry of dispatchers.
//!
//! One `Store` is created at application start and handed to every
//! screen that needs to stay in sync. Clones share the same dispatchers.

use crate::model::{Comment, Entity, Notification, Post, User, UserProfile};
use crate::store::dispatcher::Dispatcher;

/// Process-wide set of dispatchers, one per entity type.
#[derive(Clone)]
pub struct Store {
    posts: Dispatcher<Post>,
    notifications: Dispatcher<Notification>,
    comments: Dispatcher<Comment>,
    users: Dispatcher<User>,
    profiles: Dispatcher<UserProfile>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        tracing::debug!("Store created");
        Self {
            posts: Dispatcher::new("post"),
            notifications: Dispatcher::new("notification"),
            comments: Dispatcher::new("comment"),
            users: Dispatcher::new("user"),
            profiles: Dispatcher::new("profile"),
        }
    }

    pub fn posts(&self) -> &Dispatcher<Post> {
        &self.posts
    }

    pub fn notifications(&self) -> &Dispatcher<Notification> {
        &self.notifications
    }

    pub fn comments(&self) -> &Dispatcher<Comment> {
        &self.comments
    }

    pub fn users(&self) -> &Dispatcher<User> {
        &self.users
    }

    pub fn profiles(&self) -> &Dispatcher<UserProfile> {
        &self.profiles
    }

    /// Dispatcher for `T`, for code generic over the entity type.
    pub fn of<T: StoreEntity>(&self) -> &Dispatcher<T> {
        T::dispatcher(self)
    }
}

/// Entities that have a dispatcher in the [`Store`].
pub trait StoreEntity: Entity {
    fn dispatcher(store: &Store) -> &Dispatcher<Self>;
}

impl StoreEntity for Post {
    fn dispatcher(store: &Store) -> &Dispatcher<Self> {
        store.posts()
    }
}

impl StoreEntity for Notification {
    fn dispatcher(store: &Store) -> &Dispatcher<Self> {
        store.notifications()
    }
}

impl StoreEntity for Comment {
    fn dispatcher(store: &Store) -> &Dispatcher<Self> {
        store.comments()
    }
}

impl StoreEntity for User {
    fn dispatcher(store: &Store) -> &Dispatcher<Self> {
        store.users()
    }
}

impl StoreEntity for UserProfile {
    fn dispatcher(store: &Store) -> &Dispatcher<Self> {
        store.profiles()
    }
}
