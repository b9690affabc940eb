//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! SQLite storage and the password/session services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `sqlite` - SQLite storage via SeaORM, schema bootstrap via the migrator
//! - `auth` - Argon2 password hashing + JWT session tokens

#[cfg(feature = "sqlite")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "sqlite")]
pub use database::{DatabaseConfig, RequestConnection};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtSessionService, SessionConfig};
