//! Ledger error types for validation and state errors.

use fiado_shared::{AppError, CustomerId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::CurrencyTrack;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amounts cannot be negative.
    #[error("Transaction amounts cannot be negative")]
    NegativeAmount,

    /// Amounts are stored to the cent; finer precision is rejected.
    #[error("Transaction amounts are limited to 2 decimal places")]
    TooManyDecimalPlaces,

    /// At least one of the primary or bolivar amounts must be positive.
    #[error("Either amount_primary or amount_bs must be positive")]
    EmptyAmounts,

    /// A secondary (dual) amount is only valid on the BCV-USD track.
    #[error("amount_secondary is only valid for bcv_usd transactions")]
    SecondaryOutsideBcvUsd,

    /// Only purchases carry a dual secondary amount.
    #[error("amount_secondary is only valid on purchases")]
    SecondaryOnPayment,

    /// A dual secondary amount must be positive.
    #[error("amount_secondary must be positive when present")]
    NonPositiveSecondary,

    // ========== State Errors ==========
    /// Only purchases can be settled.
    #[error("Transaction {0} is not a purchase and cannot be settled")]
    NotAPurchase(TransactionId),

    /// The purchase is already settled.
    #[error("Transaction {0} is already settled")]
    AlreadySettled(TransactionId),

    /// The purchase is not currently settled.
    #[error("Transaction {0} is not settled")]
    NotSettled(TransactionId),

    /// Deleting is rejected while the linked quote is externally referenced.
    #[error("Transaction {0} is linked to an externally referenced quote and cannot be deleted")]
    QuoteExternallyReferenced(TransactionId),

    // ========== Lookup Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    // ========== Consistency ==========
    /// A cached balance disagrees with a fresh recompute beyond tolerance.
    #[error("Cached {track} balance {cached} disagrees with recompute {computed}")]
    BalanceCacheMismatch {
        /// The track whose cache disagrees.
        track: CurrencyTrack,
        /// The cached value.
        cached: Decimal,
        /// The freshly recomputed value.
        computed: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::TooManyDecimalPlaces => "TOO_MANY_DECIMAL_PLACES",
            Self::EmptyAmounts => "EMPTY_AMOUNTS",
            Self::SecondaryOutsideBcvUsd => "SECONDARY_OUTSIDE_BCV_USD",
            Self::SecondaryOnPayment => "SECONDARY_ON_PAYMENT",
            Self::NonPositiveSecondary => "NON_POSITIVE_SECONDARY",
            Self::NotAPurchase(_) => "NOT_A_PURCHASE",
            Self::AlreadySettled(_) => "ALREADY_SETTLED",
            Self::NotSettled(_) => "NOT_SETTLED",
            Self::QuoteExternallyReferenced(_) => "QUOTE_EXTERNALLY_REFERENCED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::BalanceCacheMismatch { .. } => "BALANCE_CACHE_MISMATCH",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::NegativeAmount
            | LedgerError::TooManyDecimalPlaces
            | LedgerError::EmptyAmounts
            | LedgerError::SecondaryOutsideBcvUsd
            | LedgerError::SecondaryOnPayment
            | LedgerError::NonPositiveSecondary => Self::Validation(err.to_string()),

            LedgerError::NotAPurchase(_)
            | LedgerError::AlreadySettled(_)
            | LedgerError::NotSettled(_)
            | LedgerError::QuoteExternallyReferenced(_) => Self::InvalidState(err.to_string()),

            LedgerError::TransactionNotFound(_) | LedgerError::CustomerNotFound(_) => {
                Self::NotFound(err.to_string())
            }

            LedgerError::BalanceCacheMismatch { .. } => Self::Consistency(err.to_string()),
        }
    }
}
