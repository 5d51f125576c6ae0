//! # Receipt API
//!
//! HTTP server that scores purchase receipts.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Receipt API                                     │
//! │                                                                         │
//! │  Client ──► axum Router ──► handlers ──► ReceiptService                 │
//! │             (routes.rs)                  (receipt-store)                │
//! │                  │                            │                         │
//! │                  ▼                            ▼                         │
//! │             ApiError (error.rs)          receipt-core rules             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HOST` - bind interface (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 8080)
//! - `RECEIPT_REQUIRE_TOTAL_MATCH` - reject totals that differ from the item sum
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use tracing_subscriber::EnvFilter;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=receipt_store=trace` - Trace the store only
/// - Default: INFO, DEBUG for the receipt crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,receipt_api=debug,receipt_store=debug,receipt_core=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
