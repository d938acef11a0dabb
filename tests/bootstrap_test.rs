use groundwork::config::{Backend, DatabaseConfig, PostgresConfig};
use groundwork::db::tables::KvStoreTable;
use groundwork::{all_tables, Database, DbPool, StoreError};
use tempfile::TempDir;

fn sqlite_config(temp_dir: &TempDir) -> DatabaseConfig {
    let path = temp_dir
        .path()
        .join("store.db")
        .to_string_lossy()
        .to_string();
    DatabaseConfig {
        backend: Backend::Sqlite,
        pool_size: 5,
        sqlite_path: Some(path),
        postgres: PostgresConfig::default(),
    }
}

async fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::initialize(&sqlite_config(&temp_dir))
        .await
        .expect("initialize failed");
    (db, temp_dir)
}

fn sqlite_pool(db: &Database) -> &sqlx::SqlitePool {
    match db.pool() {
        DbPool::Sqlite(pool) => pool,
        DbPool::Postgres(_) => panic!("expected sqlite pool"),
    }
}

#[tokio::test]
async fn test_initialize_creates_every_table() {
    let (db, _temp) = setup_db().await;

    for table in all_tables() {
        assert!(
            db.pool().has_table(table.name()).await.unwrap(),
            "table '{}' missing after initialize",
            table.name()
        );
    }
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let (db, _temp) = setup_db().await;

    let created = db.bootstrap().await.expect("second bootstrap failed");
    assert_eq!(created, 0);

    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
            .fetch_one(sqlite_pool(&db))
            .await
            .unwrap();
    assert!(count >= all_tables().len() as i64);
}

#[tokio::test]
async fn test_reinitialize_same_file_creates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = sqlite_config(&temp_dir);

    let first = Database::initialize(&config).await.expect("first init failed");
    drop(first);

    let second = Database::initialize(&config).await.expect("second init failed");
    assert_eq!(second.bootstrap().await.unwrap(), 0);
}

#[tokio::test]
async fn test_metadata_seeded_exactly_once() {
    let (db, _temp) = setup_db().await;

    // A re-run must not duplicate the install record.
    db.bootstrap().await.unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM server_metadata")
        .fetch_one(sqlite_pool(&db))
        .await
        .unwrap();
    assert_eq!(count, 1);

    let (version,): (i64,) = sqlx::query_as("SELECT schema_version FROM server_metadata")
        .fetch_one(sqlite_pool(&db))
        .await
        .unwrap();
    assert_eq!(version, groundwork::db::tables::SCHEMA_VERSION as i64);
}

#[tokio::test]
async fn test_teardown_removes_every_table() {
    let (db, _temp) = setup_db().await;

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
async fn test_bootstrap_after_teardown_recreates() {
    let (db, _temp) = setup_db().await;

    db.teardown_tables().await.unwrap();
    let created = db.bootstrap().await.unwrap();
    assert_eq!(created, all_tables().len());
}

#[tokio::test]
async fn test_foreign_keys_pragma_on() {
    let (db, _temp) = setup_db().await;

    let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
        .fetch_one(sqlite_pool(&db))
        .await
        .unwrap();
    assert_eq!(enabled, 1);
}

#[tokio::test]
async fn test_duplicate_registry_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let pool = DbPool::connect(&sqlite_config(&temp_dir))
        .await
        .expect("connect failed");

    let result = Database::new(pool, vec![Box::new(KvStoreTable), Box::new(KvStoreTable)]);
    match result {
        Err(StoreError::DuplicateTable(name)) => assert_eq!(name, "kv_store"),
        _ => panic!("Expected DuplicateTable error"),
    }
}

#[tokio::test]
async fn test_run_migrations_is_a_noop() {
    let (db, _temp) = setup_db().await;
    db.run_migrations().await.expect("migration stub failed");
}
