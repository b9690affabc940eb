use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user. Fails with `RepoError::Constraint` if the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// All posts with their author's username, newest first.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    /// One post with its author's username.
    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite title and body. Fails with `RepoError::NotFound` if no row matched.
    async fn update_content(&self, id: i32, title: &str, body: &str) -> Result<(), RepoError>;
}
