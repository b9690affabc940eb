//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::ports::{PasswordService, SessionTokenService};
use inkpost_infra::{Argon2PasswordService, DatabaseConfig, JwtSessionService};

use crate::config::AppConfig;

/// Shared application state.
///
/// Holds configuration and stateless services only; database connections are
/// opened per request.
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<DatabaseConfig>,
    pub passwords: Arc<dyn PasswordService>,
    pub sessions: Arc<dyn SessionTokenService>,
}

impl AppState {
    /// Build the application state from configuration.
    pub fn new(config: &AppConfig) -> Self {
        tracing::info!(
            database = %config.database.path.display(),
            "Application state initialized"
        );

        Self {
            database: Arc::new(config.database.clone()),
            passwords: Arc::new(Argon2PasswordService::new()),
            sessions: Arc::new(JwtSessionService::new(config.session())),
        }
    }
}
