//! Application configuration loaded from environment variables.

use std::env;

use inkpost_infra::{DatabaseConfig, SessionConfig};

const DEFAULT_SECRET_KEY: &str = "dev";
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime (one year).
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Signs the session cookie.
    pub secret_key: String,
    pub session_ttl_hours: i64,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let secret_key = var("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());

        if secret_key == DEFAULT_SECRET_KEY {
            let is_production = var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default SECRET_KEY in production! Set SECRET_KEY environment variable."
                );
            } else {
                tracing::warn!("Using default SECRET_KEY. Set SECRET_KEY for production use.");
            }
        }

        let port = match var("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(port = %raw, "Invalid PORT, using 8080");
                8080
            }),
            None => 8080,
        };

        Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            secret_key,
            session_ttl_hours: session_ttl_hours(var("SESSION_TTL_HOURS")),
            database: DatabaseConfig::new(
                var("DATABASE").unwrap_or_else(|| "instance/inkpost.sqlite".to_string()),
            ),
        }
    }

    /// Configuration pointing at a specific database file, used by tests.
    #[cfg(test)]
    pub fn for_database(database: DatabaseConfig) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            secret_key: "test-secret".to_string(),
            session_ttl_hours: 1,
            database,
        }
    }

    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            secret: self.secret_key.clone(),
            ttl_hours: self.session_ttl_hours,
            ..SessionConfig::default()
        }
    }
}

/// Parse `SESSION_TTL_HOURS`, keeping it within `1..=MAX_SESSION_TTL_HOURS`.
fn session_ttl_hours(raw: Option<String>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_SESSION_TTL_HOURS;
    };

    match raw.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
        _ => {
            tracing::warn!(
                value = %raw,
                max = MAX_SESSION_TTL_HOURS,
                "Invalid SESSION_TTL_HOURS, using {DEFAULT_SESSION_TTL_HOURS}"
            );
            DEFAULT_SESSION_TTL_HOURS
        }
    }
}
