use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr, EntityTrait, PaginatorTrait};
use tokio::sync::Mutex;

use inkpost_core::error::RepoError;
use migration::{Migrator, MigratorTrait, SchemaManager};

use super::entity::user::Entity as UserEntity;
use super::sqlite_base::query_error;

/// Location of the SQLite database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// SQLx connection URL; the file is created on first connect.
    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }

    /// Create the directory holding the database file if it is missing.
    pub fn ensure_parent_dir(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(dir) if dir != Path::new("") => std::fs::create_dir_all(dir),
            _ => Ok(()),
        }
    }
}

/// Open a single-connection handle to the database file.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, RepoError> {
    let opts = ConnectOptions::new(config.url())
        .max_connections(1)
        .min_connections(0)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false)
        .to_owned();

    Database::connect(opts)
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))
}

/// A database connection scoped to one HTTP request.
///
/// Nothing is opened until [`RequestConnection::connection`] is first called;
/// later calls in the same request reuse that handle. [`RequestConnection::close`]
/// releases it and is a no-op when nothing was opened.
#[derive(Clone)]
pub struct RequestConnection {
    config: Arc<DatabaseConfig>,
    slot: Arc<Mutex<Option<DbConn>>>,
}

impl RequestConnection {
    pub fn new(config: Arc<DatabaseConfig>) -> Self {
        Self {
            config,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the request's connection, opening it on first use.
    pub async fn connection(&self) -> Result<DbConn, RepoError> {
        let mut slot = self.slot.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = connect(&self.config).await?;
        tracing::debug!(path = %self.config.path.display(), "Opened request connection");
        Ok(slot.insert(conn).clone())
    }

    pub async fn is_open(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Release the connection if one was opened.
    pub async fn close(&self) -> Result<(), RepoError> {
        let conn = self.slot.lock().await.take();
        if let Some(conn) = conn {
            conn.close()
                .await
                .map_err(|e| RepoError::Connection(e.to_string()))?;
            tracing::debug!("Closed request connection");
        }
        Ok(())
    }
}

/// Drop and recreate the `user` and `post` tables.
///
/// Refuses to touch a database that already has registered users unless
/// `force` is set.
pub async fn init_schema(config: &DatabaseConfig, force: bool) -> Result<(), RepoError> {
    let conn = connect(config).await?;
    let result = recreate_schema(&conn, force).await;

    conn.close()
        .await
        .map_err(|e| RepoError::Connection(e.to_string()))?;
    result
}

async fn recreate_schema(conn: &DbConn, force: bool) -> Result<(), RepoError> {
    if !force {
        let users = existing_users(conn).await.map_err(query_error)?;
        if users > 0 {
            return Err(RepoError::Constraint(format!(
                "database already holds {users} user(s); refusing to recreate the schema"
            )));
        }
    }

    Migrator::fresh(conn).await.map_err(query_error)?;
    tracing::info!("Database schema recreated");
    Ok(())
}

async fn existing_users(conn: &DbConn) -> Result<u64, DbErr> {
    if !SchemaManager::new(conn).has_table("user").await? {
        return Ok(0);
    }
    UserEntity::find().count(conn).await
}
