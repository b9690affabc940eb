//! In-memory port implementations for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostWithAuthor, User};
use crate::error::RepoError;
use crate::ports::{AuthError, BaseRepository, PasswordService, PostRepository, UserRepository};

/// Reversible "hash" so tests stay fast and deterministic.
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn with_user(username: &str, password: &str) -> Self {
        let users = Self::default();
        users.rows.lock().unwrap().push(User {
            id: 1,
            username: username.to_string(),
            password_hash: format!("hashed:{password}"),
        });
        users
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn count_named(&self, username: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.username == username)
            .count()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUsers {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("user.username".to_string()));
        }
        let user = User {
            id: rows.len() as i32 + 1,
            username: user.username,
            password_hash: user.password_hash,
        };
        rows.push(user.clone());
        Ok(user)
    }
}

pub struct InMemoryPosts {
    authors: HashMap<i32, String>,
    rows: Mutex<Vec<Post>>,
}

impl InMemoryPosts {
    pub fn with_authors(authors: &[(i32, &str)]) -> Self {
        Self {
            authors: authors
                .iter()
                .map(|(id, name)| (*id, name.to_string()))
                .collect(),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn join(&self, post: &Post) -> PostWithAuthor {
        PostWithAuthor {
            id: post.id,
            author_id: post.author_id,
            username: self.authors[&post.author_id].clone(),
            title: post.title.clone(),
            body: post.body.clone(),
            created: post.created,
        }
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPosts {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = self.rows.lock().unwrap();
        let mut listed: Vec<_> = rows.iter().map(|p| self.join(p)).collect();
        listed.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(listed)
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).map(|p| self.join(p)))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        if !self.authors.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("post.author_id".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let post = Post {
            id,
            author_id: post.author_id,
            title: post.title,
            body: post.body,
            created: post.created,
        };
        rows.push(post.clone());
        Ok(post)
    }

    async fn update_content(&self, id: i32, title: &str, body: &str) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let post = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.title = title.to_string();
        post.body = body.to_string();
        Ok(())
    }
}
