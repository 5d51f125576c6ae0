//! # Application State
//!
//! Shared state handed to every handler.
//!
//! ## Thread Safety
//! `ReceiptService` guards its store with an internal `RwLock`, so the
//! state only needs an `Arc` to be shared across requests.

use std::sync::Arc;

use receipt_store::ReceiptService;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub service: Arc<ReceiptService>,
}

impl AppState {
    pub fn new(service: ReceiptService) -> Self {
        AppState {
            service: Arc::new(service),
        }
    }

    /// Builds a fresh, empty service from configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        AppState::new(ReceiptService::new(config.validator()))
    }
}
