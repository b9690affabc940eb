//! Blog handlers: the public index and author-only post editing.

use actix_web::{HttpResponse, web};

use inkpost_core::DomainError;
use inkpost_core::services::blog;
use inkpost_infra::database::SqlitePostRepository;
use inkpost_shared::dto::PostForm;

use super::redirect;
use crate::middleware::{AppResult, AuthUser, CurrentUser, Db};
use crate::pages::{CreatePage, IndexPage, UpdatePage, render};

async fn post_repository(db: &Db) -> AppResult<SqlitePostRepository> {
    Ok(SqlitePostRepository::new(db.connection().await?))
}

/// GET /
pub async fn index(db: Db, current: CurrentUser) -> AppResult<HttpResponse> {
    let posts = post_repository(&db).await?;
    let posts = blog::list_posts(&posts).await?;

    Ok(render(&IndexPage {
        current_user: current.user(),
        error: None,
        posts,
    }))
}

/// GET /create
pub async fn create_form(AuthUser(user): AuthUser) -> HttpResponse {
    render(&CreatePage {
        current_user: Some(&user),
        error: None,
        title: "",
        body: "",
    })
}

/// POST /create
pub async fn create(
    AuthUser(user): AuthUser,
    db: Db,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let posts = post_repository(&db).await?;

    match blog::create_post(&posts, &user, &form.title, &form.body).await {
        Ok(_) => Ok(redirect("/")),
        Err(DomainError::Validation(message)) => Ok(render(&CreatePage {
            current_user: Some(&user),
            error: Some(message),
            title: &form.title,
            body: &form.body,
        })),
        Err(e) => Err(e.into()),
    }
}

/// GET /{id}/update
pub async fn update_form(
    AuthUser(user): AuthUser,
    db: Db,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let posts = post_repository(&db).await?;
    let post = blog::get_post(&posts, path.into_inner(), Some(&user)).await?;

    Ok(render(&UpdatePage {
        current_user: Some(&user),
        error: None,
        post: &post,
        title: &post.title,
        body: &post.body,
    }))
}

/// POST /{id}/update
pub async fn update(
    AuthUser(user): AuthUser,
    db: Db,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let posts = post_repository(&db).await?;

    match blog::update_post(&posts, &user, id, &form.title, &form.body).await {
        Ok(()) => Ok(redirect("/")),
        Err(DomainError::Validation(message)) => {
            let post = blog::get_post(&posts, id, Some(&user)).await?;
            Ok(render(&UpdatePage {
                current_user: Some(&user),
                error: Some(message),
                post: &post,
                title: &form.title,
                body: &form.body,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /{id}/delete
pub async fn delete(
    AuthUser(user): AuthUser,
    db: Db,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let posts = post_repository(&db).await?;
    blog::delete_post(&posts, &user, path.into_inner()).await?;

    Ok(redirect("/"))
}
