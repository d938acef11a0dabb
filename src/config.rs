use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Storage backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" => Ok(Backend::Postgres),
            other => Err(ConfigError::InvalidValue(
                "DATABASE_BACKEND".to_string(),
                format!("must be sqlite or postgres, got {}", other),
            )),
        }
    }
}

/// Connection parameters for the persistence layer.
///
/// Embeddable in a host application's JSON config; `from_env` covers
/// deployments that configure through the environment instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Database file location. Required when the backend is sqlite.
    #[serde(default)]
    pub sqlite_path: Option<String>,
    #[serde(default)]
    pub postgres: PostgresConfig,
}

/// PostgreSQL connection parameters. A set `url` wins over the
/// discrete fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: Option<String>,
    pub ssl: bool,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        PostgresConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            database: None,
            ssl: false,
        }
    }
}

fn default_pool_size() -> u32 {
    5
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let backend = env_map
            .get("DATABASE_BACKEND")
            .map(|s| s.as_str())
            .unwrap_or("sqlite")
            .parse::<Backend>()?;

        let pool_size = env_map
            .get("DATABASE_POOL_SIZE")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<u32>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DATABASE_POOL_SIZE".to_string(),
                    "must be a valid u32".to_string(),
                )
            })?;

        let sqlite_path = env_map.get("DATABASE_PATH").cloned();

        let port = env_map
            .get("DATABASE_PORT")
            .map(|s| s.as_str())
            .unwrap_or("5432")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "DATABASE_PORT".to_string(),
                    "must be a valid u16".to_string(),
                )
            })?;

        let ssl = match env_map
            .get("DATABASE_SSL")
            .map(|s| s.as_str())
            .unwrap_or("false")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "DATABASE_SSL".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let postgres = PostgresConfig {
            url: env_map.get("DATABASE_URL").cloned(),
            host: env_map
                .get("DATABASE_HOST")
                .cloned()
                .unwrap_or_else(|| "localhost".to_string()),
            port,
            user: env_map
                .get("DATABASE_USER")
                .cloned()
                .unwrap_or_else(|| "postgres".to_string()),
            password: env_map.get("DATABASE_PASSWORD").cloned(),
            database: env_map.get("DATABASE_NAME").cloned(),
            ssl,
        };

        let config = DatabaseConfig {
            backend,
            pool_size,
            sqlite_path,
            postgres,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that cannot possibly connect. Run by `from_env_map`;
    /// call it separately after deserializing from a host config file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            Backend::Sqlite if self.sqlite_path.is_none() => {
                Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()))
            }
            Backend::Postgres
                if self.postgres.url.is_none() && self.postgres.database.is_none() =>
            {
                Err(ConfigError::MissingEnv("DATABASE_NAME".to_string()))
            }
            _ => Ok(()),
        }
    }
}
