//! Boundary to the remote paged endpoints.
//!
//! The transport itself (requests, retries, codecs) lives outside this
//! crate. Anything that can return a decoded page of entities implements
//! [`EndpointSource`].

mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::model::Entity;

pub use memory::MemorySource;

/// Which paged collection to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    /// Main feed, or one user's posts when `user_id` is set.
    Newsfeed { user_id: Option<u64> },
    Notifications,
    Comments { post_id: u64 },
    Friends { user_id: u64 },
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Newsfeed { user_id: None } => write!(f, "newsfeed"),
            Endpoint::Newsfeed {
                user_id: Some(user_id),
            } => write!(f, "newsfeed/{}", user_id),
            Endpoint::Notifications => write!(f, "notifications"),
            Endpoint::Comments { post_id } => write!(f, "comments/{}", post_id),
            Endpoint::Friends { user_id } => write!(f, "friends/{}", user_id),
        }
    }
}

/// Position of the next page to fetch.
///
/// `page` is 1-based. `token` carries an opaque server cursor when the
/// endpoint hands one out; sources that page by index ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub page: u32,
    pub token: Option<String>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::first()
    }
}

impl Cursor {
    pub fn first() -> Self {
        Self {
            page: 1,
            token: None,
        }
    }

    /// Cursor for the page after `page`.
    pub fn advance<T>(&self, page: &Page<T>) -> Self {
        Self {
            page: self.page.saturating_add(1),
            token: page.next_token.clone(),
        }
    }
}

/// One page of decoded entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self {
            items,
            has_more,
            next_token: None,
        }
    }

    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }
}

/// Fetches page `cursor` of `endpoint`.
#[async_trait]
pub trait EndpointSource<T: Entity>: Send + Sync {
    async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        cursor: &Cursor,
        page_size: usize,
    ) -> Result<Page<T>, FetchError>;
}
