//! Command-line argument parsing for the Alumia integration engine
//!
//! Defines the CLI structure using clap derive macros. The CLI is an
//! operator surface: it initializes the engine from configuration, runs sync
//! cycles, fetches individual resources, and reports status.

use clap::{Args, Parser, Subcommand};

use crate::app::models::ResourceType;

/// Alumia Sync - integration cache/sync engine for tourism data
#[derive(Parser, Debug)]
#[command(
    name = "alumia_sync",
    version,
    about = "Fetch, cache, and synchronize Alumia tourism data",
    long_about = "Integration engine for the Alumia tourism data provider.
Caches responses per resource type, runs non-overlapping background sync cycles,
and degrades to deterministic fallback data when the provider is unavailable."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the integration and print a status snapshot
    Status,

    /// Run one sync cycle and report its outcome
    Sync,

    /// Fetch a single resource and print the payload as JSON
    Fetch(FetchArgs),

    /// Clear all cached entries
    ClearCache,
}

/// Arguments for the fetch command
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Resource to fetch: destinations, events, bookings, or analytics
    pub resource: ResourceType,

    /// Category filter (destinations and events)
    #[arg(long)]
    pub category: Option<String>,

    /// City filter (destinations)
    #[arg(long)]
    pub city: Option<String>,

    /// Status filter (events and bookings)
    #[arg(long)]
    pub status: Option<String>,

    /// Reporting period (analytics), e.g. 7d or 30d
    #[arg(long)]
    pub period: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
