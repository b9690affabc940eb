//! Error handling - maps failures to HTML error pages.

use actix_web::{
    HttpRequest, HttpResponse, ResponseError, error::UrlencodedError, http::StatusCode,
};
use std::fmt;

use inkpost_core::domain::User;
use inkpost_core::error::{DomainError, RepoError};
use inkpost_core::ports::AuthError;

use crate::pages::{ErrorPage, render_with_status};

/// Application-level error type that converts to an error page.
///
/// Field validation and credential failures never reach this type: handlers
/// catch them and re-render their form with the message inline. `BadRequest`
/// covers form payloads that cannot be decoded at all.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Forbidden,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        render_with_status(self.status_code(), &self.page(None))
    }
}

impl AppError {
    /// The error page for this error, with the navigation drawn for
    /// `current_user`. Internal details are never shown.
    pub fn page<'a>(&'a self, current_user: Option<&'a User>) -> ErrorPage<'a> {
        let detail = match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => Some(detail.as_str()),
            AppError::Forbidden | AppError::Internal(_) => None,
        };

        ErrorPage::new(self.status_code(), detail, current_user)
    }
}

/// Rejects malformed form submissions with a 400 page.
pub fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected form payload");
    AppError::BadRequest("The submitted form could not be read.".to_string()).into()
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            err @ DomainError::NotFound { .. } => AppError::NotFound(err.to_string()),
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Auth(err) => err.into(),
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Storage(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => {
                tracing::error!("Database constraint violated: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::IncorrectUsername | AuthError::IncorrectPassword => {
                AppError::BadRequest(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
