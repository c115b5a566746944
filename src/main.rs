//! Alumia Sync CLI application
//!
//! Command-line interface for the Alumia integration cache/sync engine.
//! Initializes the engine from environment/config-file settings and runs one
//! operation: status, sync, fetch, or clear-cache.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use alumia_sync::cli::{
    handle_clear_cache, handle_fetch, handle_status, handle_sync, Cli, Commands,
};
use alumia_sync::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("Alumia Sync v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Status => handle_status().await,
        Commands::Sync => handle_sync().await,
        Commands::Fetch(args) => handle_fetch(args).await,
        Commands::ClearCache => handle_clear_cache().await,
    }
}

/// Initialize logging based on verbosity flags
fn init_logging(cli: &Cli) {
    let default_level = if cli.global.quiet {
        "warn"
    } else if cli.global.very_verbose {
        "debug"
    } else if cli.global.verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alumia_sync={default_level}")));

    fmt().with_env_filter(filter).with_target(false).init();
}
