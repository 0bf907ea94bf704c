//! `carlotd` — the car listing server binary.
//!
//! Usage:
//!   carlotd [--data-dir <dir>] [--db <path>] [--listen <addr>]
//!
//! The redb database defaults to `{data-dir}/data.redb`.

mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use carlot_core::Module;

/// Car listing server.
#[derive(Parser, Debug)]
#[command(name = "carlotd", about = "Car listing server")]
struct Cli {
    /// Base data directory for persistent state.
    #[arg(long = "data-dir")]
    data_dir: Option<std::path::PathBuf>,

    /// Path to the redb database file (overrides `{data-dir}/data.redb`).
    #[arg(long = "db")]
    db: Option<std::path::PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = carlot_core::ServiceConfig {
        data_dir: cli.data_dir.clone(),
        db_path: cli.db.clone(),
        listen: cli.listen.clone(),
    };

    if let Some(ref dir) = config.data_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize the embedded store.
    let db_path = config.resolve_db_path();
    info!("Opening KV store at {}", db_path.display());
    let kv: Arc<dyn carlot_kv::KVStore> = Arc::new(
        carlot_kv::RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open KV store: {}", e))?,
    );

    let listing_module = listing::ListingModule::new(Arc::clone(&kv));
    info!("Listing module initialized");

    let module_routes = vec![(listing_module.name().to_string(), listing_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("carlotd listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
