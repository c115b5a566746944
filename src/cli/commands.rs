//! Command handlers for the Alumia integration CLI
//!
//! Each handler loads configuration, builds an engine instance, and performs
//! one operation against it. The engine's own contract applies: fetch
//! commands never fail, they degrade to fallback data.

use tracing::info;

use crate::app::models::{
    AnalyticsQuery, BookingFilters, DestinationFilters, EventFilters, ResourceType,
};
use crate::app::AlumiaService;
use crate::cli::args::FetchArgs;
use crate::config::IntegrationConfig;
use crate::errors::Result;

/// Build and initialize a service instance from configuration
async fn build_service() -> Result<AlumiaService> {
    let config = IntegrationConfig::load()?;
    let service = AlumiaService::new(config)?;
    let connected = service.initialize().await;
    if !connected {
        info!("Integration not connected; commands will serve fallback data");
    }
    Ok(service)
}

/// Handle the status command
pub async fn handle_status() -> Result<()> {
    let service = build_service().await?;
    let status = service.status().await;
    println!("{}", serde_json::to_string_pretty(&status).map_err(io_err)?);
    service.stop_auto_sync().await;
    Ok(())
}

/// Handle the sync command
pub async fn handle_sync() -> Result<()> {
    let service = build_service().await?;
    match service.sync_now().await {
        Some(run) => {
            println!("{}", serde_json::to_string_pretty(&run).map_err(io_err)?)
        }
        None => println!("Sync cycle already in progress; skipped"),
    }
    service.stop_auto_sync().await;
    Ok(())
}

/// Handle the fetch command
pub async fn handle_fetch(args: FetchArgs) -> Result<()> {
    let service = build_service().await?;

    let payload = match args.resource {
        ResourceType::Destinations => {
            let filters = DestinationFilters {
                category: args.category,
                city: args.city,
                ..Default::default()
            };
            serde_json::to_value(service.get_destinations(&filters).await)
        }
        ResourceType::Events => {
            let filters = EventFilters {
                category: args.category,
                status: args.status,
                ..Default::default()
            };
            serde_json::to_value(service.get_events(&filters).await)
        }
        ResourceType::Bookings => {
            let filters = BookingFilters {
                status: args.status,
                ..Default::default()
            };
            serde_json::to_value(service.get_bookings(&filters).await)
        }
        ResourceType::Analytics => {
            let query = args
                .period
                .map(|period| AnalyticsQuery { period })
                .unwrap_or_default();
            serde_json::to_value(service.get_analytics(&query).await)
        }
    }
    .map_err(io_err)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&payload).map_err(io_err)?
    );
    service.stop_auto_sync().await;
    Ok(())
}

/// Handle the clear-cache command
pub async fn handle_clear_cache() -> Result<()> {
    let service = build_service().await?;
    service.clear_cache().await;
    let status = service.status().await;
    println!("Cache cleared ({} entries remain)", status.cache_size);
    service.stop_auto_sync().await;
    Ok(())
}

fn io_err(e: serde_json::Error) -> crate::errors::AppError {
    crate::errors::AppError::generic(format!("failed to render JSON output: {e}"))
}
