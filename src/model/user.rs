use serde::{Deserialize, Serialize};

use super::Entity;

/// Compact user record embedded in posts, comments and friend lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl Entity for User {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Full profile shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub self_intro: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub company: Vec<String>,
    #[serde(default)]
    pub university: Vec<String>,
}

impl Entity for UserProfile {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

impl UserProfile {
    /// The compact form used when the profile owner appears as an author.
    pub fn as_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}
