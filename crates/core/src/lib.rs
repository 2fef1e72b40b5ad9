//! Core business logic for Fiado.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `customer` - Customer aggregate with cached currency balances
//! - `ledger` - Accounts-receivable transaction log and balance recompute
//! - `quote` - Dual-currency quote (presupuesto) pricing engine
//! - `projection` - Pure BCV/Divisas re-expression of outstanding balances
//! - `rate` - Reference exchange rate source seam
//! - `share` - Opaque share-token generation

pub mod customer;
pub mod ledger;
pub mod projection;
pub mod quote;
pub mod rate;
pub mod share;
