//! Command-line interface components
//!
//! CLI-specific code for exercising and inspecting the integration engine
//! from a terminal: argument parsing and command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, FetchArgs, GlobalArgs};
pub use commands::{handle_clear_cache, handle_fetch, handle_status, handle_sync};
