//! Accounts-receivable ledger logic.
//!
//! This module implements the core ledger functionality:
//! - Transaction domain types (purchases and payments on three currency tracks)
//! - Invariant validation for new and edited transactions
//! - Full-log balance recompute and cache verification
//! - Settle / unsettle / edit / delete state rules
//! - Error types for ledger operations

pub mod balance;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use balance::{CustomerBalances, cache_tolerance};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{
    CreateTransactionInput, CurrencyTrack, EditTransactionInput, Transaction, TxKind,
};
pub use validation::validate_amounts;
