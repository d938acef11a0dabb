//! The persistence bootstrap layer.
//!
//! This module provides:
//! - `DbPool`: the SQLite/Postgres connection handle
//! - `TableDef`: the table descriptor seam
//! - `Database`: open a connection, ensure every registered table exists,
//!   tear them down again for tests and reset paths

pub mod pool;
pub mod table;
pub mod tables;

pub use pool::DbPool;
pub use table::TableDef;
pub use tables::all_tables;

use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::{Backend, DatabaseConfig};
use crate::error::StoreError;

/// The persistence service: a connection handle plus the table registry it
/// is responsible for.
pub struct Database {
    pool: DbPool,
    tables: Vec<Box<dyn TableDef>>,
}

impl Database {
    /// Assemble a database over an already-open pool.
    ///
    /// # Errors
    /// Returns `DuplicateTable` if two descriptors claim the same name.
    pub fn new(pool: DbPool, tables: Vec<Box<dyn TableDef>>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for table in &tables {
            if !seen.insert(table.name()) {
                return Err(StoreError::DuplicateTable(table.name().to_string()));
            }
        }
        Ok(Database { pool, tables })
    }

    /// Connect per the config and bring the full registry into existence.
    ///
    /// Idempotent: running against an already-initialized database succeeds
    /// and creates nothing.
    pub async fn initialize(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = DbPool::connect(config).await?;
        let db = Database::new(pool, all_tables())?;
        let created = db.bootstrap().await?;
        info!(
            "Database initialized on {} backend ({} tables, {} created)",
            db.backend(),
            db.tables.len(),
            created
        );
        Ok(db)
    }

    /// Ensure each registered table exists, one at a time, in declared
    /// order. Returns how many were newly created.
    pub async fn bootstrap(&self) -> Result<usize, StoreError> {
        let mut created = 0usize;
        for table in &self.tables {
            if self.ensure_table(table.as_ref()).await? {
                debug!("Created table '{}'", table.name());
                created += 1;
            }
        }
        Ok(created)
    }

    async fn ensure_table(&self, table: &dyn TableDef) -> Result<bool, StoreError> {
        if self.pool.has_table(table.name()).await? {
            return Ok(false);
        }

        // IF NOT EXISTS on the rendered DDL makes a table appearing between
        // the probe and the create harmless; the seed still runs at most
        // once per process.
        self.pool.create_table(table.create()).await?;
        for index in table.indexes() {
            self.pool.create_index(index).await?;
        }
        table.seed(&self.pool).await?;
        Ok(true)
    }

    /// Drop every registered table, in declared order.
    pub async fn teardown_tables(&self) -> Result<(), StoreError> {
        for table in &self.tables {
            self.pool.drop_table(table.name()).await?;
        }
        Ok(())
    }

    /// Migration entrypoint. Schema changes currently ship through the
    /// bootstrap path; versioned migrations land here once two released
    /// layouts exist.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        debug!("No schema migrations registered");
        Ok(())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn backend(&self) -> Backend {
        self.pool.backend()
    }
}
