//! Linkweave: internal-linking analyzer server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use linkweave_server::cli::{self, Report};
use linkweave_server::routes;
use linkweave_server::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LINKWEAVE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" | "help" => {
                cli::print_usage();
                return Ok(());
            }
            command => {
                let Some(report) = Report::parse(command) else {
                    eprintln!("Unknown command: {}. Use 'linkweave help' for usage.", command);
                    std::process::exit(1);
                };
                let Some(org_id) = args.get(2) else {
                    eprintln!("Usage: linkweave {} <org-id>", command);
                    std::process::exit(1);
                };
                match cli::run_report(&resolve_data_dir(), report, org_id) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("{} failed: {}", command, e);
                        std::process::exit(1);
                    }
                }
                return Ok(());
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    let config = linkweave_core::LinkweaveConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = linkweave_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    info!("Database: {}", store.db_path().display());

    let state = Arc::new(AppState::new(config, store));

    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Linkweave server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
