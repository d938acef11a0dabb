//! Acceptance checks against a live PostgreSQL.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use groundwork::config::{Backend, DatabaseConfig, PostgresConfig};
use groundwork::{all_tables, Database};

fn postgres_config() -> DatabaseConfig {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    DatabaseConfig {
        backend: Backend::Postgres,
        pool_size: 5,
        sqlite_path: None,
        postgres: PostgresConfig {
            url: Some(url),
            ..PostgresConfig::default()
        },
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn bootstrap_teardown_roundtrip() {
    let db = Database::initialize(&postgres_config())
        .await
        .expect("initialize failed");

    for table in all_tables() {
        assert!(
            db.pool().has_table(table.name()).await.unwrap(),
            "table '{}' missing after initialize",
            table.name()
        );
    }

    db.teardown_tables().await.expect("teardown failed");

    for table in all_tables() {
        assert!(
            !db.pool().has_table(table.name()).await.unwrap(),
            "table '{}' still present after teardown",
            table.name()
        );
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn bootstrap_is_idempotent() {
    let db = Database::initialize(&postgres_config())
        .await
        .expect("initialize failed");

    assert_eq!(db.bootstrap().await.unwrap(), 0);

    // Leave the schema clean for the next run.
    db.teardown_tables().await.expect("teardown failed");
}
