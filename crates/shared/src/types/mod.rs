//! Shared domain primitives: typed IDs and money helpers.

pub mod id;
pub mod money;

pub use id::{CustomerId, QuoteCode, TransactionId};
pub use money::{MONEY_DP, round2, round_dp};
