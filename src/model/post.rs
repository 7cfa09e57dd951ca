use serde::{Deserialize, Serialize};

use super::{Entity, User};

/// A newsfeed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: User,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub comment_count: u64,
    /// Creation time as reported by the server (opaque, display only).
    #[serde(default)]
    pub posted_at: String,
}

impl Entity for Post {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Server answer to a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub likes: u64,
    pub is_liked: bool,
}

impl Post {
    /// New snapshot with the like state reported by the server.
    pub fn with_like(&self, response: LikeResponse) -> Self {
        Self {
            likes: response.likes,
            is_liked: response.is_liked,
            ..self.clone()
        }
    }
}
