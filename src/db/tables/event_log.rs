use sea_query::{ColumnDef, Expr, Index, IndexCreateStatement, Table, TableCreateStatement};

use crate::db::table::TableDef;

/// Append-only application log entries.
pub struct EventLogTable;

impl TableDef for EventLogTable {
    fn name(&self) -> &'static str {
        "event_log"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("id")
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new("level").string().string_len(16).not_null())
            .col(ColumnDef::new("scope").string().string_len(64).not_null())
            .col(ColumnDef::new("message").text().not_null())
            .col(
                ColumnDef::new("created_on")
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned()
    }

    fn indexes(&self) -> Vec<IndexCreateStatement> {
        // Retention pruning deletes by age.
        vec![Index::create()
            .name("idx_event_log_created_on")
            .table(self.name())
            .col(Expr::col("created_on"))
            .to_owned()]
    }
}
