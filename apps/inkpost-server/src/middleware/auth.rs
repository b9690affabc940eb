//! Session cookie, current-user loading and the login guard.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::{BoxBody, EitherBody, MessageBody},
    cookie::{Cookie, SameSite, time::Duration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{StatusCode, header},
    web,
};
use std::fmt;
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use askama::Template;

use inkpost_core::domain::User;
use inkpost_core::ports::BaseRepository;
use inkpost_infra::database::SqliteUserRepository;

use super::db::Db;
use super::error::AppError;
use crate::state::AppState;

/// Name of the cookie holding the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Where anonymous visitors of protected pages are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, ttl_seconds: i64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(ttl_seconds))
        .finish()
}

/// Cookie that makes the browser forget the session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// The logged-in user for this request, if any.
///
/// Populated once per request by [`LoadCurrentUser`]; handlers receive it as an
/// extractor argument.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default()))
    }
}

/// Guard extractor for protected handlers.
///
/// Yields the logged-in user, or short-circuits with a redirect to the login
/// page before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Rejection produced by [`AuthUser`] for anonymous requests.
#[derive(Debug)]
pub struct LoginRequired;

impl fmt::Display for LoginRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Login required")
    }
}

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

impl FromRequest for AuthUser {
    type Error = LoginRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<CurrentUser>()
            .and_then(|current| current.0.clone());

        ready(user.map(AuthUser).ok_or(LoginRequired))
    }
}

/// Resolve the session cookie into a user record.
///
/// Missing, tampered or expired sessions and sessions naming a user that no
/// longer exists all resolve to anonymous. Storage failures are errors.
async fn resolve_current_user(req: &HttpRequest) -> Result<Option<User>, AppError> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let claims = match state.sessions.verify(cookie.value()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            return Ok(None);
        }
    };

    let db = Db::from_request_parts(req)?;
    let users = SqliteUserRepository::new(db.connection().await?);
    let user = BaseRepository::<User, i32>::find_by_id(&users, claims.user_id).await?;

    if user.is_none() {
        tracing::debug!(user_id = claims.user_id, "Session names an unknown user");
    }

    Ok(user)
}

/// Middleware attaching [`CurrentUser`] to every request before routing.
///
/// Error pages produced by [`AppError`] are redrawn with the logged-in user's
/// navigation, since the error itself has no access to the request.
pub struct LoadCurrentUser;

impl<S, B> Transform<S, ServiceRequest> for LoadCurrentUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = LoadCurrentUserService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoadCurrentUserService {
            service: Rc::new(service),
        }))
    }
}

pub struct LoadCurrentUserService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoadCurrentUserService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let user = resolve_current_user(req.request()).await?;
            req.extensions_mut().insert(CurrentUser(user.clone()));

            let res = service.call(req).await?;

            let redrawn = match (&user, res.response().error()) {
                (Some(user), Some(err)) => err
                    .as_error::<AppError>()
                    .and_then(|err| err.page(Some(user)).render().ok()),
                _ => None,
            };

            Ok(match redrawn {
                Some(html) => res.map_body(|_, _| EitherBody::right(BoxBody::new(html))),
                None => res.map_into_left_body(),
            })
        })
    }
}
