use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a short text post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// A post joined with its author's username, as listed and edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub id: i32,
    pub author_id: i32,
    pub username: String,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

impl PostWithAuthor {
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.author_id == user_id
    }
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

impl NewPost {
    /// Create a new post stamped with the current time.
    pub fn new(author_id: i32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            body: body.into(),
            created: Utc::now(),
        }
    }

    /// Override the creation timestamp (fixtures and imports).
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }
}
