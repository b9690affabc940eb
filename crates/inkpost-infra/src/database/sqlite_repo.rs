//! SQLite repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};

use inkpost_core::domain::{NewPost, NewUser, Post, PostWithAuthor, User};
use inkpost_core::error::RepoError;
use inkpost_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::sqlite_base::{SqliteBaseRepository, query_error};

/// SQLite user repository.
pub type SqliteUserRepository = SqliteBaseRepository<UserEntity>;

/// SQLite post repository.
pub type SqlitePostRepository = SqliteBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = user.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }
}

/// Row shape of `post JOIN user`.
#[derive(Debug, FromQueryResult)]
struct PostRow {
    id: i32,
    author_id: i32,
    username: String,
    title: String,
    body: String,
    created: chrono::DateTime<chrono::Utc>,
}

impl From<PostRow> for PostWithAuthor {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            author_id: row.author_id,
            username: row.username,
            title: row.title,
            body: row.body,
            created: row.created,
        }
    }
}

fn select_with_author() -> Select<PostEntity> {
    PostEntity::find()
        .select_only()
        .columns([
            post::Column::Id,
            post::Column::AuthorId,
            post::Column::Title,
            post::Column::Body,
            post::Column::Created,
        ])
        .column(user::Column::Username)
        .join(JoinType::InnerJoin, post::Relation::User.def())
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = select_with_author()
            .order_by_desc(post::Column::Created)
            .order_by_desc(post::Column::Id)
            .into_model::<PostRow>()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = select_with_author()
            .filter(post::Column::Id.eq(id))
            .into_model::<PostRow>()
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }

    async fn update_content(&self, id: i32, title: &str, body: &str) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(title))
            .col_expr(post::Column::Body, Expr::value(body))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
