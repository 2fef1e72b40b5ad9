//! Invariant validation for new and edited transactions.

use rust_decimal::Decimal;

use fiado_shared::round2;

use super::error::LedgerError;
use super::types::{CurrencyTrack, TxKind};

/// Validates the amount invariants shared by creation and edit.
///
/// - All amounts must be non-negative.
/// - All amounts must carry at most 2 decimal places, so balances fold over
///   them without any further rounding.
/// - `amount_primary > 0` or `amount_bs > 0` (never both zero).
/// - `amount_secondary` only on BCV-USD purchases, and positive when present.
///
/// # Errors
///
/// Returns the first violated invariant; nothing is persisted on error.
pub fn validate_amounts(
    kind: TxKind,
    currency_track: CurrencyTrack,
    amount_primary: Decimal,
    amount_bs: Decimal,
    amount_secondary: Option<Decimal>,
) -> Result<(), LedgerError> {
    if amount_primary < Decimal::ZERO || amount_bs < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    if round2(amount_primary) != amount_primary || round2(amount_bs) != amount_bs {
        return Err(LedgerError::TooManyDecimalPlaces);
    }
    if amount_primary == Decimal::ZERO && amount_bs == Decimal::ZERO {
        return Err(LedgerError::EmptyAmounts);
    }
    if let Some(secondary) = amount_secondary {
        if round2(secondary) != secondary {
            return Err(LedgerError::TooManyDecimalPlaces);
        }
        if currency_track != CurrencyTrack::BcvUsd {
            return Err(LedgerError::SecondaryOutsideBcvUsd);
        }
        if kind != TxKind::Purchase {
            return Err(LedgerError::SecondaryOnPayment);
        }
        if secondary <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveSecondary);
        }
    }
    Ok(())
}
