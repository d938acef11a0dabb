//! The fixed table registry.
//!
//! `all_tables()` is the single source of truth for which tables exist and
//! in what order they bootstrap and tear down.

mod event_log;
mod kv;
mod metadata;
mod notifications;
mod sessions;
mod users;

pub use event_log::EventLogTable;
pub use kv::KvStoreTable;
pub use metadata::{ServerMetadataTable, SCHEMA_VERSION};
pub use notifications::NotificationsTable;
pub use sessions::SessionsTable;
pub use users::UsersTable;

use super::table::TableDef;

/// Every table, in bootstrap order. Order is part of the contract:
/// bootstrap and teardown both walk this list front to back.
pub fn all_tables() -> Vec<Box<dyn TableDef>> {
    vec![
        Box::new(ServerMetadataTable),
        Box::new(KvStoreTable),
        Box::new(UsersTable),
        Box::new(SessionsTable),
        Box::new(EventLogTable),
        Box::new(NotificationsTable),
    ]
}
