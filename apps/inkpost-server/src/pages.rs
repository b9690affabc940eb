//! Askama page templates and the helpers that turn them into responses.

use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header::ContentType};
use askama::Template;

use inkpost_core::domain::{PostWithAuthor, User};

/// Render a template as a 200 HTML response.
pub fn render<T: Template>(template: &T) -> HttpResponse {
    render_with_status(StatusCode::OK, template)
}

pub fn render_with_status<T: Template>(status: StatusCode, template: &T) -> HttpResponse {
    match template.render() {
        Ok(html) => HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(html),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render template");
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Failed to render page")
        }
    }
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterPage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub username: &'a str,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub username: &'a str,
}

#[derive(Template)]
#[template(path = "blog/index.html")]
pub struct IndexPage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub posts: Vec<PostWithAuthor>,
}

#[derive(Template)]
#[template(path = "blog/create.html")]
pub struct CreatePage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub title: &'a str,
    pub body: &'a str,
}

/// Edit form for an existing post; `title`/`body` hold what the form shows,
/// which differs from `post` after a rejected submission.
#[derive(Template)]
#[template(path = "blog/update.html")]
pub struct UpdatePage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub post: &'a PostWithAuthor,
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub current_user: Option<&'a User>,
    pub error: Option<String>,
    pub status: u16,
    pub reason: &'a str,
    pub detail: Option<&'a str>,
}

impl<'a> ErrorPage<'a> {
    pub fn new(status: StatusCode, detail: Option<&'a str>, current_user: Option<&'a User>) -> Self {
        Self {
            current_user,
            error: None,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
            detail,
        }
    }
}
