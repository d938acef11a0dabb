//! The table descriptor seam.

use async_trait::async_trait;
use sea_query::{IndexCreateStatement, TableCreateStatement};

use super::pool::DbPool;

/// One database table: its name, its layout, and what happens the first
/// time it is created.
///
/// Layout is expressed as a query-builder statement and rendered for
/// whichever backend is active, so descriptors stay dialect-free. The
/// few statements that cannot be (existence probe, drops) live on
/// [`DbPool`].
#[async_trait]
pub trait TableDef: Send + Sync {
    /// Table name as it appears in the database. Unique across the registry.
    fn name(&self) -> &'static str;

    /// Column layout.
    fn create(&self) -> TableCreateStatement;

    /// Secondary indexes created alongside the table.
    fn indexes(&self) -> Vec<IndexCreateStatement> {
        Vec::new()
    }

    /// Rows inserted right after the table is first created. Runs at most
    /// once per database: only when the bootstrap probe found the table
    /// absent.
    async fn seed(&self, _pool: &DbPool) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
