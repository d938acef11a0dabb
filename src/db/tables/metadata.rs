use async_trait::async_trait;
use chrono::Utc;
use sea_query::{ColumnDef, Table, TableCreateStatement};

use crate::db::pool::DbPool;
use crate::db::table::TableDef;

/// Layout revision shipped by this crate. Bumped together with the table
/// definitions; `run_migrations` consumes it once versioned migrations exist.
pub const SCHEMA_VERSION: i32 = 1;

/// Single-row install record: which schema revision this database carries,
/// when it was first created, and the settings blob the installer wrote.
pub struct ServerMetadataTable;

#[async_trait]
impl TableDef for ServerMetadataTable {
    fn name(&self) -> &'static str {
        "server_metadata"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("schema_version")
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(
                ColumnDef::new("installed_at")
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new("settings").json_binary().not_null())
            .to_owned()
    }

    async fn seed(&self, pool: &DbPool) -> Result<(), sqlx::Error> {
        let settings = serde_json::json!({ "installed_by": env!("CARGO_PKG_VERSION") });
        let sql = format!(
            r#"INSERT INTO "server_metadata" ("schema_version", "installed_at", "settings") VALUES ({}, '{}', '{}')"#,
            SCHEMA_VERSION,
            Utc::now().to_rfc3339(),
            settings
        );
        pool.execute(&sql).await
    }
}
