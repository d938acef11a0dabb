use sea_query::{ColumnDef, Expr, Index, IndexCreateStatement, Table, TableCreateStatement};

use crate::db::table::TableDef;

/// Users as seen through a messaging channel. The same person arriving via
/// two channels is two rows; (channel, user_id) identifies one.
pub struct UsersTable;

impl TableDef for UsersTable {
    fn name(&self) -> &'static str {
        "users"
    }

    fn create(&self) -> TableCreateStatement {
        Table::create()
            .table(self.name())
            .col(
                ColumnDef::new("id")
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new("channel").string().string_len(64).not_null())
            .col(
                ColumnDef::new("user_id")
                    .string()
                    .string_len(255)
                    .not_null(),
            )
            .col(ColumnDef::new("attributes").json_binary().not_null())
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
            .name("idx_users_channel_user_id")
            .table(self.name())
            .col(Expr::col("channel"))
            .col(Expr::col("user_id"))
            .unique()
            .to_owned()]
    }
}
