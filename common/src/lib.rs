//! Common types and utilities for the SmartTodo+ API
//!
//! This library contains the pieces shared by the service crates: a unified
//! error type, the environment-based configuration loader, and the database
//! pool factory.

pub mod config;
pub mod db;
pub mod error;

/// Re-export important types
pub use config::AppConfig;
pub use db::DbPool;
pub use error::{Error, Result};
