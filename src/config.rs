//! Application configuration loaded from environment variables.

use std::env;

/// HTTP header carrying the acting user reference.
pub const USER_HEADER: &str = "X-User";

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_DATABASE_URL: &str = "postgres://pi:pi@localhost:5432/pipeline_inspector";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_DB_MAX_CONNECTIONS: u32 = 10;
    pub const DEV_DB_MIN_CONNECTIONS: u32 = 1;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string (PostgreSQL in production, SQLite accepted locally)
    pub url: String,
    /// Upper bound of pooled connections
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database settings
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a default
    /// and only RUST_ENV is required. In production mode the server refuses to
    /// start while DATABASE_URL still points at the development default.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `PI_HOST`: Server host (default: 127.0.0.1)
    /// - `PI_PORT`: Server port (default: 8080)
    /// - `DATABASE_URL`: Database connection string
    /// - `PI_DB_MAX_CONNECTIONS`: Pool size (default: 10)
    /// - `PI_DB_MIN_CONNECTIONS`: Idle pool size (default: 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("PI_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("PI_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("PI_PORT must be a valid port number"))?;

        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DEV_DATABASE_URL.to_string());

        let max_connections = env::var("PI_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| defaults::DEV_DB_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| {
                ConfigError::InvalidValue("PI_DB_MAX_CONNECTIONS must be a valid number")
            })?;

        let min_connections = env::var("PI_DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| defaults::DEV_DB_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| {
                ConfigError::InvalidValue("PI_DB_MIN_CONNECTIONS must be a valid number")
            })?;

        let config = Config {
            environment,
            host,
            port,
            database: DatabaseConfig {
                url,
                max_connections,
                min_connections,
            },
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.url == defaults::DEV_DATABASE_URL {
            errors.push(format!(
                "DATABASE_URL is using development default '{}'. Set a production database URL.",
                defaults::DEV_DATABASE_URL
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            errors.push(
                "PI_DB_MIN_CONNECTIONS must not exceed PI_DB_MAX_CONNECTIONS".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
