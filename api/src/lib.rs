//! HTTP layer for the SmartTodo+ API
//!
//! Exposes the router, the cross-cutting middleware stack, and the two
//! service endpoints. The binary in `main.rs` wires this onto a listener
//! and drives the process lifecycle.

pub mod api;
pub mod error;
pub mod middleware;
pub mod router;

use common::db::DbPool;

/// App state shared across handlers
pub struct AppState {
    /// Database connection pool
    pub pool: DbPool,
}
