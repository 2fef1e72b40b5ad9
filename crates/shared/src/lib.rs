//! Shared types, errors, and configuration for Fiado.
//!
//! This crate holds the pieces every other crate agrees on:
//! - Application-wide error taxonomy
//! - Configuration loading
//! - Typed IDs and money rounding helpers

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, RatesConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use types::{CustomerId, QuoteCode, TransactionId, round2, round_dp};
