//! SQLite storage: request-scoped connections, schema bootstrap and repositories.

mod connection;
mod sqlite_base;
pub mod sqlite_repo;

pub mod entity;

pub use connection::{DatabaseConfig, RequestConnection, connect, init_schema};
pub use sqlite_repo::{SqlitePostRepository, SqliteUserRepository};

#[cfg(test)]
mod tests;
