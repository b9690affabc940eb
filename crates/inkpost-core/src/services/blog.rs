//! Post listing and author-only mutations.

use crate::domain::{NewPost, Post, PostWithAuthor, User};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Every post with its author, newest first.
pub async fn list_posts(posts: &dyn PostRepository) -> Result<Vec<PostWithAuthor>, DomainError> {
    Ok(posts.list_with_authors().await?)
}

/// Fetch a post, optionally requiring `required_author` to own it.
pub async fn get_post(
    posts: &dyn PostRepository,
    id: i32,
    required_author: Option<&User>,
) -> Result<PostWithAuthor, DomainError> {
    let post = posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    if let Some(user) = required_author {
        if !post.is_authored_by(user.id) {
            tracing::warn!(post_id = id, user_id = user.id, "Rejected access to post by non-author");
            return Err(DomainError::Forbidden);
        }
    }

    Ok(post)
}

pub async fn create_post(
    posts: &dyn PostRepository,
    author: &User,
    title: &str,
    body: &str,
) -> Result<Post, DomainError> {
    require_title(title)?;

    let post = posts.create(NewPost::new(author.id, title, body)).await?;
    tracing::info!(post_id = post.id, author_id = author.id, "Post created");
    Ok(post)
}

/// Overwrite a post's title and body. Ownership is checked before the input.
pub async fn update_post(
    posts: &dyn PostRepository,
    author: &User,
    id: i32,
    title: &str,
    body: &str,
) -> Result<(), DomainError> {
    get_post(posts, id, Some(author)).await?;
    require_title(title)?;

    posts
        .update_content(id, title, body)
        .await
        .map_err(|e| not_found_or(e, id))?;
    tracing::info!(post_id = id, "Post updated");
    Ok(())
}

pub async fn delete_post(
    posts: &dyn PostRepository,
    author: &User,
    id: i32,
) -> Result<(), DomainError> {
    get_post(posts, id, Some(author)).await?;

    posts.delete(id).await.map_err(|e| not_found_or(e, id))?;
    tracing::info!(post_id = id, "Post deleted");
    Ok(())
}

fn require_title(title: &str) -> Result<(), DomainError> {
    if title.is_empty() {
        return Err(DomainError::validation("Title is required."));
    }
    Ok(())
}

fn post_not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn not_found_or(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::services::fakes::InMemoryPosts;

    fn user(id: i32, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password_hash: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_posts_is_newest_first_for_any_insertion_order() {
        let posts = InMemoryPosts::with_authors(&[(1, "test")]);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for offset in [3, 1, 4, 0, 2] {
            posts
                .create(
                    NewPost::new(1, format!("post {offset}"), "")
                        .created_at(base + Duration::minutes(offset)),
                )
                .await
                .unwrap();
        }

        let listed = list_posts(&posts).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["post 4", "post 3", "post 2", "post 1", "post 0"]);
        assert!(listed.iter().all(|p| p.username == "test"));
    }

    #[tokio::test]
    async fn test_get_post_access_rules() {
        let posts = InMemoryPosts::with_authors(&[(1, "test"), (2, "other")]);
        let post = posts.create(NewPost::new(1, "title", "body")).await.unwrap();

        let missing = get_post(&posts, 99, Some(&user(1, "test"))).await;
        assert!(matches!(
            missing,
            Err(DomainError::NotFound { entity_type: "Post", id: 99 })
        ));

        let foreign = get_post(&posts, post.id, Some(&user(2, "other"))).await;
        assert!(matches!(foreign, Err(DomainError::Forbidden)));

        let unchecked = get_post(&posts, post.id, None).await.unwrap();
        assert_eq!(unchecked.username, "test");

        let owned = get_post(&posts, post.id, Some(&user(1, "test"))).await.unwrap();
        assert_eq!(owned.title, "title");
    }

    #[tokio::test]
    async fn test_create_post_requires_title() {
        let posts = InMemoryPosts::with_authors(&[(1, "test")]);
        let author = user(1, "test");

        let err = create_post(&posts, &author, "", "body").await.unwrap_err();
        assert_eq!(err.to_string(), "Title is required.");
        assert_eq!(posts.len(), 0);

        let post = create_post(&posts, &author, "t", "").await.unwrap();
        assert_eq!(post.author_id, 1);
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_update_checks_ownership_before_title() {
        let posts = InMemoryPosts::with_authors(&[(1, "test"), (2, "other")]);
        let post = posts.create(NewPost::new(1, "title", "body")).await.unwrap();

        let err = update_post(&posts, &user(2, "other"), post.id, "", "")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));

        let err = update_post(&posts, &user(1, "test"), post.id, "", "")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        update_post(&posts, &user(1, "test"), post.id, "updated", "new body")
            .await
            .unwrap();
        let updated = get_post(&posts, post.id, None).await.unwrap();
        assert_eq!(updated.title, "updated");
        assert_eq!(updated.body, "new body");
    }

    #[tokio::test]
    async fn test_delete_post() {
        let posts = InMemoryPosts::with_authors(&[(1, "test"), (2, "other")]);
        let post = posts.create(NewPost::new(1, "title", "body")).await.unwrap();

        let err = delete_post(&posts, &user(2, "other"), post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(posts.len(), 1);

        delete_post(&posts, &user(1, "test"), post.id).await.unwrap();
        assert_eq!(posts.len(), 0);

        let err = delete_post(&posts, &user(1, "test"), post.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
