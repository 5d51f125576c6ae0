//! # receipt-store: Storage and Scoring for Receipt Points
//!
//! Holds accepted receipts for the lifetime of the process and computes
//! their points.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Points Data Flow                            │
//! │                                                                         │
//! │  HTTP handler (process_receipt / get_points)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   receipt-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌───────────────┐   ┌───────────────┐  │   │
//! │  │   │ ReceiptService │──►│    Scorer     │──►│ ReceiptStore  │  │   │
//! │  │   │ (service.rs)   │   │ (scorer.rs)   │   │ (memory.rs)   │  │   │
//! │  │   │ submit/lookup  │   │ rules → store │   │ RwLock<Map>   │  │   │
//! │  │   └────────────────┘   └───────────────┘   └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipt-core (validation + rules, pure)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`memory`] - The identifier-keyed store
//! - [`scorer`] - Applies the rule set to a stored record
//! - [`service`] - `submit` / `lookup` entry points
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod scorer;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::ReceiptStore;
pub use scorer::Scorer;
pub use service::ReceiptService;
