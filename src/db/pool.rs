//! Connection handling and the backend-specific SQL that the query-builder
//! does not cover: the table existence probe, drop semantics, and SQLite
//! pragma setup.

use sea_query::{IndexCreateStatement, PostgresQueryBuilder, SqliteQueryBuilder, TableCreateStatement};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::PgPool;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::config::{Backend, ConfigError, DatabaseConfig, PostgresConfig};
use crate::error::StoreError;

/// The connection handle, one variant per supported backend.
///
/// Pools clone cheaply; `Database` owns the canonical copy for the
/// duration of startup.
#[derive(Clone)]
pub enum DbPool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl DbPool {
    /// Open a pool for whichever backend the config selects.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        match config.backend {
            Backend::Sqlite => {
                let path = config
                    .sqlite_path
                    .as_deref()
                    .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;
                Ok(DbPool::Sqlite(connect_sqlite(path, config.pool_size).await?))
            }
            Backend::Postgres => Ok(DbPool::Postgres(
                connect_postgres(&config.postgres, config.pool_size).await?,
            )),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            DbPool::Sqlite(_) => Backend::Sqlite,
            DbPool::Postgres(_) => Backend::Postgres,
        }
    }

    /// Run a single statement on the active pool.
    pub async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
        match self {
            DbPool::Sqlite(pool) => {
                sqlx::query(sql).execute(pool).await?;
            }
            DbPool::Postgres(pool) => {
                sqlx::query(sql).execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Whether a table with this name exists in the active schema.
    pub async fn has_table(&self, name: &str) -> Result<bool, sqlx::Error> {
        match self {
            DbPool::Sqlite(pool) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?)",
                )
                .bind(name)
                .fetch_one(pool)
                .await
            }
            DbPool::Postgres(pool) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM information_schema.tables \
                     WHERE table_schema = current_schema() AND table_name = $1)",
                )
                .bind(name)
                .fetch_one(pool)
                .await
            }
        }
    }

    /// Render and run a CREATE TABLE for the active dialect.
    pub async fn create_table(&self, mut stmt: TableCreateStatement) -> Result<(), sqlx::Error> {
        stmt.if_not_exists();
        let sql = match self {
            DbPool::Sqlite(_) => stmt.build(SqliteQueryBuilder),
            DbPool::Postgres(_) => stmt.build(PostgresQueryBuilder),
        };
        self.execute(&sql).await
    }

    /// Render and run a CREATE INDEX for the active dialect.
    pub async fn create_index(&self, mut stmt: IndexCreateStatement) -> Result<(), sqlx::Error> {
        stmt.if_not_exists();
        let sql = match self {
            DbPool::Sqlite(_) => stmt.build(SqliteQueryBuilder),
            DbPool::Postgres(_) => stmt.build(PostgresQueryBuilder),
        };
        self.execute(&sql).await
    }

    /// Drop a table if it exists.
    ///
    /// SQLite enforces foreign keys per connection, so the off/drop/on
    /// sequence is pinned to a single acquired connection. Postgres drops
    /// with CASCADE instead.
    pub async fn drop_table(&self, name: &str) -> Result<(), sqlx::Error> {
        match self {
            DbPool::Sqlite(pool) => {
                let mut conn = pool.acquire().await?;
                sqlx::query("PRAGMA foreign_keys = OFF")
                    .execute(&mut *conn)
                    .await?;
                sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{}""#, name))
                    .execute(&mut *conn)
                    .await?;
                sqlx::query("PRAGMA foreign_keys = ON")
                    .execute(&mut *conn)
                    .await?;
            }
            DbPool::Postgres(pool) => {
                sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{}" CASCADE"#, name))
                    .execute(pool)
                    .await?;
            }
        }
        Ok(())
    }
}

async fn connect_sqlite(db_path: &str, pool_size: u32) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    SqlitePoolOptions::new()
        .max_connections(pool_size)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
}

async fn connect_postgres(pg: &PostgresConfig, pool_size: u32) -> Result<PgPool, sqlx::Error> {
    let options = match &pg.url {
        Some(url) => PgConnectOptions::from_str(url)?,
        None => {
            let mut options = PgConnectOptions::new()
                .host(&pg.host)
                .port(pg.port)
                .username(&pg.user)
                .ssl_mode(if pg.ssl {
                    PgSslMode::Require
                } else {
                    PgSslMode::Prefer
                });
            if let Some(database) = &pg.database {
                options = options.database(database);
            }
            if let Some(password) = &pg.password {
                options = options.password(password);
            }
            options
        }
    };

    PgPoolOptions::new()
        .max_connections(pool_size)
        .connect_with(options)
        .await
}

/// Per-connection SQLite pragmas: referential integrity on, WAL for
/// concurrent readers, a busy timeout instead of immediate SQLITE_BUSY.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the mode actually set; must use fetch to get it
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
