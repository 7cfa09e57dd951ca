use serde::{Deserialize, Serialize};

use super::{Entity, User};

/// A comment on a post.
///
/// Comments form two-level threads: `depth == 1` is a top-level comment
/// with no parent, `depth == 2` is a reply whose `parent` is the id of
/// the top-level comment it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub author: User,
    pub content: String,
    #[serde(default = "default_depth")]
    pub depth: u8,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub created_at: String,
}

fn default_depth() -> u8 {
    1
}

impl Entity for Comment {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.depth >= 2 && self.parent.is_some()
    }

    /// Id of the top-level comment this comment's thread hangs off.
    pub fn thread_root(&self) -> u64 {
        match self.parent {
            Some(parent) if self.depth >= 2 => parent,
            _ => self.id,
        }
    }

    /// Parent id to use when the user replies to this comment.
    ///
    /// Replies never nest deeper than two levels, so replying to a reply
    /// attaches the new comment to the same thread root.
    pub fn reply_parent(&self) -> u64 {
        self.thread_root()
    }
}
