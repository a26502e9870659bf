//! Application configuration loaded from environment variables.

use std::str::FromStr;

use serde::Deserialize;
use sqlx::postgres::PgSslMode;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// Postgres connection string.
    pub database_url: String,

    /// TLS mode for the pool: disable, allow, prefer, require, verify-ca, verify-full.
    #[serde(default = "default_ssl_mode")]
    pub database_ssl_mode: String,

    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    // === Server Configuration ===
    /// HTTP listening port.
    #[serde(default = "default_port")]
    pub port: u16,
}

// `require` encrypts the connection but skips certificate verification.
fn default_ssl_mode() -> String {
    "require".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_port() -> u16 {
    3005
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        let url = url::Url::parse(&self.database_url)
            .map_err(|e| format!("DATABASE_URL is not a valid URL: {}", e))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(format!(
                "DATABASE_URL must use the postgres scheme, got {}",
                url.scheme()
            ));
        }

        self.ssl_mode()?;

        if self.database_max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(())
    }

    /// Parsed TLS mode for the connection pool.
    pub fn ssl_mode(&self) -> Result<PgSslMode, String> {
        PgSslMode::from_str(&self.database_ssl_mode)
            .map_err(|_| format!("unknown DATABASE_SSL_MODE: {}", self.database_ssl_mode))
    }

    /// Connection string with any password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        match url::Url::parse(&self.database_url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.to_string()
            }
            Err(_) => "<invalid>".to_string(),
        }
    }
}
