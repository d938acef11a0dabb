use groundwork::{config::DatabaseConfig, Database};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match DatabaseConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Open the connection and ensure the schema exists
    let db = match Database::initialize(&config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db.run_migrations().await {
        eprintln!("Migration error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Schema ready on {} backend", db.backend());
}
