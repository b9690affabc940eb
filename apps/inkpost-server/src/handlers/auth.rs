//! Authentication handlers.

use actix_web::{HttpResponse, http::header, web};

use inkpost_core::DomainError;
use inkpost_core::ports::AuthError;
use inkpost_core::services::auth;
use inkpost_infra::database::SqliteUserRepository;
use inkpost_shared::dto::CredentialsForm;

use super::redirect;
use crate::middleware::auth::{LOGIN_PATH, removal_cookie, session_cookie};
use crate::middleware::{AppResult, CurrentUser, Db};
use crate::pages::{LoginPage, RegisterPage, render};
use crate::state::AppState;

/// GET /auth/register
pub async fn register_form(current: CurrentUser) -> HttpResponse {
    render(&RegisterPage {
        current_user: current.user(),
        error: None,
        username: "",
    })
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    db: Db,
    current: CurrentUser,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let users = SqliteUserRepository::new(db.connection().await?);

    match auth::register(
        &users,
        state.passwords.as_ref(),
        &form.username,
        &form.password,
    )
    .await
    {
        Ok(_) => Ok(redirect(LOGIN_PATH)),
        Err(DomainError::Validation(message)) => Ok(render(&RegisterPage {
            current_user: current.user(),
            error: Some(message),
            username: &form.username,
        })),
        Err(e) => Err(e.into()),
    }
}

/// GET /auth/login
pub async fn login_form(current: CurrentUser) -> HttpResponse {
    render(&LoginPage {
        current_user: current.user(),
        error: None,
        username: "",
    })
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    db: Db,
    current: CurrentUser,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let users = SqliteUserRepository::new(db.connection().await?);

    match auth::authenticate(
        &users,
        state.passwords.as_ref(),
        &form.username,
        &form.password,
    )
    .await
    {
        Ok(user) => {
            let token = state.sessions.issue(user.id)?;
            tracing::info!(user_id = user.id, "User logged in");

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .cookie(session_cookie(token, state.sessions.ttl_seconds()))
                .finish())
        }
        Err(DomainError::Auth(
            err @ (AuthError::IncorrectUsername | AuthError::IncorrectPassword),
        )) => Ok(render(&LoginPage {
            current_user: current.user(),
            error: Some(err.to_string()),
            username: &form.username,
        })),
        Err(e) => Err(e.into()),
    }
}

/// GET /auth/logout
pub async fn logout(current: CurrentUser) -> HttpResponse {
    if let Some(user) = current.user() {
        tracing::info!(user_id = user.id, "User logged out");
    }

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal_cookie())
        .finish()
}
