//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub mod handlers;
mod server;

pub use handlers::{ApiError, AppState};
pub use server::{DEFAULT_REQUEST_TIMEOUT, HttpServer};
