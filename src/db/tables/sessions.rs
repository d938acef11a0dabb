use sea_query::{ColumnDef, Expr, Index, IndexCreateStatement, Table, TableCreateStatement};

use crate::db::table::TableDef;

/// Dialog session state. `state` is the machine position, `context` the
/// accumulated variables; both are opaque JSON to this layer.
pub struct SessionsTable;

impl TableDef for SessionsTable {
    fn name(&self) -> &'static str {
        "sessions"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("id")
                    .string()
                    .string_len(255)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new("state").json_binary().not_null())
            .col(ColumnDef::new("context").json_binary().not_null())
            .col(
                ColumnDef::new("created_on")
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(
                ColumnDef::new("modified_on")
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned()
    }

    fn indexes(&self) -> Vec<IndexCreateStatement> {
        // Expiry sweeps scan by last activity.
        vec![Index::create()
            .name("idx_sessions_modified_on")
            .table(self.name())
            .col(Expr::col("modified_on"))
            .to_owned()]
    }
}
