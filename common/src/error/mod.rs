//! Error types for the SmartTodo+ API
//!
//! This module provides a unified error handling system for the whole
//! service. Startup failures (configuration, connection, connectivity)
//! are fatal by policy; the top-level entry point decides to terminate.

use thiserror::Error;

/// Service error type
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Opening the database connection pool failed
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// The database did not answer the liveness probe
    #[error("Database connectivity error: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// Socket-level failure while binding or serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
