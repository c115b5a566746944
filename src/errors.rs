//! Error types for the Alumia integration engine
//!
//! This module defines error types for all components of the crate. Errors
//! are designed to be actionable: the facade absorbs them into fallback data,
//! but diagnostics and sync reporting need to know what went wrong.

use thiserror::Error;

/// Configuration errors raised during initialization
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base URL could not be parsed
    #[error("Invalid base URL: {url} - {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Invalid configuration file format
    #[error("Invalid configuration file format")]
    InvalidFormat(#[from] toml::de::Error),

    /// I/O error reading the configuration file
    #[error("Failed to read configuration file")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the request client when a live fetch cannot be satisfied
#[derive(Error, Debug)]
pub enum RequestError {
    /// Integration is not connected; no network call was attempted
    #[error("Alumia integration is not enabled. Initialize the integration first")]
    Disabled,

    /// Request exceeded the configured timeout
    #[error("Upstream request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Provider returned a non-success response
    #[error("Alumia API error: HTTP {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (DNS, connect, TLS)
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON for the expected schema
    #[error("Failed to decode upstream response")]
    Decode(#[from] serde_json::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request client error
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Request(RequestError::Timeout { .. })
            | AppError::Request(RequestError::Http(_))
            | AppError::Request(RequestError::Upstream { .. }) => true,

            // Disabled state recovers only via explicit re-initialization
            AppError::Request(RequestError::Disabled) => false,

            _ => false,
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::Request(_) => "request",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Request result type alias
pub type RequestResult<T> = std::result::Result<T, RequestError>;
