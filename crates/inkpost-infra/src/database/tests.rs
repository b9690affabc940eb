#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use inkpost_core::domain::{NewPost, NewUser, Post, User};
    use inkpost_core::error::RepoError;
    use inkpost_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use tempfile::NamedTempFile;

    use crate::database::entity::{post, user};
    use crate::database::{
        DatabaseConfig, RequestConnection, SqlitePostRepository, SqliteUserRepository, connect,
        init_schema,
    };

    /// A throwaway database file with the schema applied.
    async fn fresh_database() -> (NamedTempFile, DatabaseConfig) {
        let file = NamedTempFile::new().unwrap();
        let config = DatabaseConfig::new(file.path());
        init_schema(&config, false).await.unwrap();
        (file, config)
    }

    async fn seed_user(config: &DatabaseConfig, username: &str) -> User {
        let users = SqliteUserRepository::new(connect(config).await.unwrap());
        users
            .create(NewUser::new(username, format!("hash-of-{username}")))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let (_file, config) = fresh_database().await;
        let created = seed_user(&config, "test").await;
        assert_eq!(created.id, 1);

        let users = SqliteUserRepository::new(connect(&config).await.unwrap());
        let found = users.find_by_username("test").await.unwrap().unwrap();
        assert_eq!(found, created);

        let by_id = BaseRepository::<User, i32>::find_by_id(&users, 1)
            .await
            .unwrap();
        assert_eq!(by_id.unwrap().username, "test");
        assert!(users.find_by_username("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_error() {
        let (_file, config) = fresh_database().await;
        seed_user(&config, "test").await;

        let conn = connect(&config).await.unwrap();
        let users = SqliteUserRepository::new(conn.clone());
        let result = users.create(NewUser::new("test", "other-hash")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(user::Entity::find().count(&conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_posts_are_listed_newest_first_with_author() {
        let (_file, config) = fresh_database().await;
        seed_user(&config, "test").await;
        let posts = SqlitePostRepository::new(connect(&config).await.unwrap());

        for (title, day) in [("middle", 15), ("oldest", 1), ("newest", 28)] {
            let created = Utc.with_ymd_and_hms(2018, 1, day, 0, 0, 0).unwrap();
            posts
                .create(NewPost::new(1, title, "body").created_at(created))
                .await
                .unwrap();
        }

        let listed = posts.list_with_authors().await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
        assert!(listed.iter().all(|p| p.username == "test" && p.author_id == 1));
    }

    #[tokio::test]
    async fn test_update_and_delete_post() {
        let (_file, config) = fresh_database().await;
        seed_user(&config, "test").await;
        let conn = connect(&config).await.unwrap();
        let posts = SqlitePostRepository::new(conn.clone());

        let created = posts.create(NewPost::new(1, "title", "")).await.unwrap();
        posts
            .update_content(created.id, "updated", "new body")
            .await
            .unwrap();

        let found = posts.find_with_author(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "updated");
        assert_eq!(found.body, "new body");
        assert_eq!(found.created, created.created);

        let plain = BaseRepository::<Post, i32>::find_by_id(&posts, created.id)
            .await
            .unwrap();
        assert_eq!(plain.unwrap().title, "updated");

        BaseRepository::<Post, i32>::delete(&posts, created.id)
            .await
            .unwrap();
        assert_eq!(post::Entity::find().count(&conn).await.unwrap(), 0);
        assert!(matches!(
            BaseRepository::<Post, i32>::delete(&posts, created.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            posts.update_content(created.id, "t", "b").await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let (_file, config) = fresh_database().await;
        let posts = SqlitePostRepository::new(connect(&config).await.unwrap());

        let result = posts.create(NewPost::new(42, "orphan", "")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_request_connection_is_lazy_and_reused() {
        let (_file, config) = fresh_database().await;
        let request = RequestConnection::new(Arc::new(config));

        assert!(!request.is_open().await);
        // Closing before anything was opened is a no-op.
        request.close().await.unwrap();

        let first = request.connection().await.unwrap();
        assert!(request.is_open().await);
        let second = request.connection().await.unwrap();

        let users = SqliteUserRepository::new(first);
        users.create(NewUser::new("test", "hash")).await.unwrap();
        let users = SqliteUserRepository::new(second);
        assert!(users.find_by_username("test").await.unwrap().is_some());

        request.close().await.unwrap();
        assert!(!request.is_open().await);
    }

    #[tokio::test]
    async fn test_init_schema_refuses_populated_database() {
        let (_file, config) = fresh_database().await;
        seed_user(&config, "test").await;

        let refused = init_schema(&config, false).await;
        assert!(matches!(refused, Err(RepoError::Constraint(_))));

        init_schema(&config, true).await.unwrap();
        let conn = connect(&config).await.unwrap();
        assert_eq!(user::Entity::find().count(&conn).await.unwrap(), 0);
    }
}
