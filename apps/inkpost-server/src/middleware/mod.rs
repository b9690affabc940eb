//! Middleware and extractors.

pub mod auth;
pub mod db;
pub mod error;

pub use auth::{AuthUser, CurrentUser, LoadCurrentUser};
pub use db::{Db, DbSession};
pub use error::{AppError, AppResult};
