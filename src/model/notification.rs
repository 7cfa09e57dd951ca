use serde::{Deserialize, Serialize};

use super::{Entity, Post};

/// An entry in the notification tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub is_checked: bool,
    /// Post the notification points at, if any. Tapping opens it.
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub created_at: String,
}

impl Entity for Notification {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Notification {
    /// New snapshot with `is_checked` replaced.
    pub fn with_checked(&self, is_checked: bool) -> Self {
        Self {
            is_checked,
            ..self.clone()
        }
    }
}
