pub mod config;
pub mod db;
pub mod error;

pub use config::{Backend, DatabaseConfig, PostgresConfig};
pub use db::{all_tables, Database, DbPool, TableDef};
pub use error::StoreError;
