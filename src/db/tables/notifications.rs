use sea_query::{ColumnDef, Expr, Index, IndexCreateStatement, Table, TableCreateStatement};

use crate::db::table::TableDef;

/// Per-user notices surfaced in the host application.
pub struct NotificationsTable;

impl TableDef for NotificationsTable {
    fn name(&self) -> &'static str {
        "notifications"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("id")
                    .string()
                    .string_len(36)
                    .not_null()
                    .primary_key(),
            )
            .col(
                ColumnDef::new("user_id")
                    .string()
                    .string_len(255)
                    .not_null(),
            )
            .col(ColumnDef::new("message").text().not_null())
            .col(
                ColumnDef::new("severity")
                    .string()
                    .string_len(16)
                    .not_null(),
            )
            .col(ColumnDef::new("read").boolean().not_null().default(false))
            .col(
                ColumnDef::new("archived")
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new("created_on")
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned()
    }

    fn indexes(&self) -> Vec<IndexCreateStatement> {
        vec![Index::create()
            .name("idx_notifications_user_id")
            .table(self.name())
            .col(Expr::col("user_id"))
            .to_owned()]
    }
}
