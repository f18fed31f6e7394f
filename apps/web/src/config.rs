//! Web server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use tracing::warn;

/// Secret used when `SESSION_SECRET` is unset. Development only.
pub const DEV_SESSION_SECRET: &str = "tipsplit-dev-secret-change-in-production";

/// Web server configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Bind host
    pub http_host: String,

    /// Bind port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Admin login name
    pub admin_username: String,

    /// Admin password
    pub admin_password: String,

    /// HMAC key for the admin session cookie
    pub session_secret: String,
}

impl WebConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_secret = match lookup("SESSION_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("SESSION_SECRET not set, using the development secret");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let config = WebConfig {
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./tipsplit.db".to_string()),

            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            admin_username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),

            admin_password: lookup("ADMIN_PASSWORD")
                .unwrap_or_else(|| "tipcalculator2026".to_string()),

            session_secret,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        if config.admin_username.is_empty() || config.admin_password.is_empty() {
            return Err(ConfigError::MissingRequired(
                "ADMIN_USERNAME / ADMIN_PASSWORD".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http_host, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_HOST".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<WebConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WebConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.database_path, "./tipsplit.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "tipcalculator2026");
        assert_eq!(config.session_secret, DEV_SESSION_SECRET);
        assert_eq!(config.bind_address().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "8080"),
            ("ADMIN_USERNAME", "boss"),
            ("SESSION_SECRET", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.bind_address().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.admin_username, "boss");
        assert_eq!(config.session_secret, "s3cret");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("HTTP_PORT", "http")]),
            Err(ConfigError::InvalidValue(key)) if key == "HTTP_PORT"
        ));
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(matches!(
            load(&[("ADMIN_PASSWORD", "")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }
}
