//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with all caption endpoints
//! - Handlers for metadata lookup, caption fetching, and storage events
//! - Error translation to JSON responses
//! - CORS middleware

pub mod handlers;
pub mod routes;

pub use routes::create_router;
