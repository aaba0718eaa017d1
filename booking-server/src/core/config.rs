//! Server configuration
//!
//! Every field can be overridden through an environment variable:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DATABASE_PATH | booking.db | SQLite database file |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | directory for daily rolling log files |
//! | JWT_SECRET / JWT_EXPIRATION_MINUTES / JWT_ISSUER / JWT_AUDIENCE | see auth | token settings |

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional log file directory
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "booking.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
