use thiserror::Error;

use crate::config::ConfigError;

/// Failures surfaced by the persistence layer.
///
/// Driver and SQL errors pass through unmodified; there is no retry or
/// recovery at this level.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Duplicate table name in registry: {0}")]
    DuplicateTable(String),
}
