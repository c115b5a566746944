//! Alumia Integration Engine
//!
//! A Rust library for integrating with the Alumia tourism data provider.
//! Shields the rest of the application from a slow, rate-limited, or
//! unavailable upstream through per-resource TTL caching, a non-overlapping
//! periodic sync loop, and graceful degradation to deterministic fallback
//! data.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use app::{AlumiaService, IntegrationStatus};
pub use config::IntegrationConfig;
pub use errors::{AppError, Result};
