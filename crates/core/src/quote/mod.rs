//! Dual-currency quote (presupuesto) pricing engine.
//!
//! - Quote domain types and pricing modes
//! - Per-item and aggregate total computation (sum-then-round)
//! - Legacy pricing-mode inference for records predating the explicit field
//! - Error types for quote operations

pub mod error;
pub mod service;
pub mod types;

pub use error::QuoteError;
pub use service::QuotePricingEngine;
pub use types::{
    BuildQuoteInput, PricingMode, Quote, QuoteItem, QuoteItemInput, QuoteStatus,
};
