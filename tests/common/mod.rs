//! Shared test utilities: a scripted endpoint and entity fixtures.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use feedsync::error::FetchError;
use feedsync::model::{Comment, Entity, Notification, Post, User};
use feedsync::pagination::{PaginationController, PaginationOptions};
use feedsync::source::{Cursor, Endpoint, EndpointSource, Page};

/// Upper bound for anything a test awaits.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// A fetch waiting for the test to answer it.
pub struct PendingFetch<T> {
    pub endpoint: Endpoint,
    pub cursor: Cursor,
    pub page_size: usize,
    reply: oneshot::Sender<Result<Page<T>, FetchError>>,
}

impl<T: Entity> PendingFetch<T> {
    pub fn respond(self, result: Result<Page<T>, FetchError>) {
        let _ = self.reply.send(result);
    }

    /// Answer with the slice of `records` this cursor points at.
    pub fn serve(self, records: &[T]) {
        let start = (self.cursor.page as usize - 1) * self.page_size;
        let end = (start + self.page_size).min(records.len());
        let items = records.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
        let has_more = end < records.len();
        self.respond(Ok(Page::new(items, has_more)));
    }

    pub fn fail(self, message: &str) {
        self.respond(Err(FetchError::Transport {
            message: message.to_string(),
        }));
    }
}

/// Endpoint whose fetches block until the test answers them, so tests
/// decide the order in which completions arrive.
pub struct ScriptedSource<T> {
    requests: mpsc::UnboundedSender<PendingFetch<T>>,
}

#[async_trait]
impl<T: Entity> EndpointSource<T> for ScriptedSource<T> {
    async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        cursor: &Cursor,
        page_size: usize,
    ) -> Result<Page<T>, FetchError> {
        let (reply, answer) = oneshot::channel();
        let pending = PendingFetch {
            endpoint: endpoint.clone(),
            cursor: cursor.clone(),
            page_size,
            reply,
        };
        if self.requests.send(pending).is_err() {
            return Err(FetchError::Transport {
                message: "script closed".to_string(),
            });
        }
        answer.await.unwrap_or_else(|_| {
            Err(FetchError::Transport {
                message: "fetch dropped by script".to_string(),
            })
        })
    }
}

/// Test side of a [`ScriptedSource`].
pub struct Script<T> {
    requests: mpsc::UnboundedReceiver<PendingFetch<T>>,
}

impl<T: Entity> Script<T> {
    /// Wait for the next fetch a controller issued.
    pub async fn next(&mut self) -> PendingFetch<T> {
        tokio::time::timeout(STEP_TIMEOUT, self.requests.recv())
            .await
            .expect("Timed out waiting for a fetch")
            .expect("Scripted source dropped")
    }

    /// True if no fetch is waiting right now.
    pub fn is_idle(&mut self) -> bool {
        self.requests.try_recv().is_err()
    }
}

pub fn scripted<T: Entity>() -> (Arc<ScriptedSource<T>>, Script<T>) {
    let (requests, rx) = mpsc::unbounded_channel();
    (
        Arc::new(ScriptedSource { requests }),
        Script { requests: rx },
    )
}

pub fn options(page_size: usize) -> PaginationOptions {
    PaginationOptions {
        page_size,
        ..PaginationOptions::default()
    }
}

/// Apply the next message, failing the test instead of hanging.
pub async fn step<T: Entity>(controller: &mut PaginationController<T>) {
    tokio::time::timeout(STEP_TIMEOUT, controller.process_next())
        .await
        .expect("Timed out waiting for a controller message");
}

pub fn ids<T: Entity>(items: &[T]) -> Vec<T::Id> {
    items.iter().map(Entity::id).collect()
}

pub fn user(id: u64) -> User {
    User {
        id,
        username: format!("user{}", id),
        profile_image: None,
    }
}

pub fn post(id: u64) -> Post {
    Post {
        id,
        author: user(id % 3 + 1),
        content: format!("post {}", id),
        likes: 0,
        is_liked: false,
        comment_count: 0,
        posted_at: String::new(),
    }
}

pub fn posts(range: std::ops::RangeInclusive<u64>) -> Vec<Post> {
    range.map(post).collect()
}

pub fn notification(id: u64) -> Notification {
    Notification {
        id,
        content: format!("notification {}", id),
        is_checked: false,
        post: Some(post(id)),
        created_at: String::new(),
    }
}

pub fn notifications(range: std::ops::RangeInclusive<u64>) -> Vec<Notification> {
    range.map(notification).collect()
}

pub fn comment(id: u64, parent: Option<u64>) -> Comment {
    Comment {
        id,
        post_id: 1,
        author: user(1),
        content: format!("comment {}", id),
        depth: if parent.is_some() { 2 } else { 1 },
        parent,
        likes: 0,
        created_at: String::new(),
    }
}
