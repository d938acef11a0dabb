use sea_query::{ColumnDef, Expr, Table, TableCreateStatement};

use crate::db::table::TableDef;

/// General-purpose key/value storage with optional expiry.
pub struct KvStoreTable;

impl TableDef for KvStoreTable {
    fn name(&self) -> &'static str {
        "kv_store"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("key")
                    .string()
                    .string_len(255)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new("value").json_binary().not_null())
            .col(
                ColumnDef::new("expires_at")
                    .timestamp_with_time_zone()
                    .null(),
            )
            .col(
                ColumnDef::new("modified_on")
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned()
    }
}
