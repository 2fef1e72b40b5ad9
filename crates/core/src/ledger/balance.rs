//! Balance derivation from the transaction log.
//!
//! Balances are always re-derived from the full log, never tracked
//! incrementally: an edit can retroactively reclassify a transaction onto
//! another currency track, and delta tracking would desync.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fiado_shared::round2;

use super::error::LedgerError;
use super::types::{CurrencyTrack, Transaction, TxKind};

/// The three cached currency balances of a customer, 2 decimal places.
///
/// A negative balance means the customer is in favor (advance payment or
/// overpayment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerBalances {
    /// Outstanding cash-USD debt.
    pub divisas: Decimal,
    /// Outstanding BCV-USD debt (settled in bolivars at the USD rate).
    pub bcv: Decimal,
    /// Outstanding BCV-EUR debt (settled in bolivars at the EUR rate).
    pub euro: Decimal,
}

impl CustomerBalances {
    /// All-zero balances.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the balance for one currency track.
    #[must_use]
    pub fn for_track(&self, track: CurrencyTrack) -> Decimal {
        match track {
            CurrencyTrack::Divisas => self.divisas,
            CurrencyTrack::BcvUsd => self.bcv,
            CurrencyTrack::BcvEur => self.euro,
        }
    }

    /// Full re-derivation of all three balances from the transaction log.
    ///
    /// Per track: sum of unsettled purchase `amount_primary` minus sum of
    /// payment `amount_primary`. Dual transactions count on their BCV-USD
    /// `amount_primary` regardless of `amount_secondary`. Settling a purchase
    /// removes it entirely (no offsetting payment record); payments always
    /// subtract, even without a matching purchase.
    #[must_use]
    pub fn derive(transactions: &[Transaction]) -> Self {
        let mut balances = Self::zero();
        for tx in transactions {
            let slot = match tx.currency_track {
                CurrencyTrack::Divisas => &mut balances.divisas,
                CurrencyTrack::BcvUsd => &mut balances.bcv,
                CurrencyTrack::BcvEur => &mut balances.euro,
            };
            match tx.kind {
                TxKind::Purchase if !tx.is_settled => *slot += tx.amount_primary,
                TxKind::Purchase => {}
                TxKind::Payment => *slot -= tx.amount_primary,
            }
        }
        Self {
            divisas: round2(balances.divisas),
            bcv: round2(balances.bcv),
            euro: round2(balances.euro),
        }
    }

    /// Verifies a cached copy against a fresh recompute.
    ///
    /// # Errors
    ///
    /// Returns `BalanceCacheMismatch` for the first track whose cached value
    /// differs from the recompute by more than the rounding tolerance. The
    /// caller must then overwrite the cache with the fresh values rather than
    /// trust it.
    pub fn verify_cached(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let fresh = Self::derive(transactions);
        let tolerance = cache_tolerance();
        for track in [
            CurrencyTrack::Divisas,
            CurrencyTrack::BcvUsd,
            CurrencyTrack::BcvEur,
        ] {
            let cached = self.for_track(track);
            let computed = fresh.for_track(track);
            if (cached - computed).abs() > tolerance {
                return Err(LedgerError::BalanceCacheMismatch {
                    track,
                    cached,
                    computed,
                });
            }
        }
        Ok(())
    }
}

/// Maximum allowed disagreement between a cached balance and a fresh
/// recompute before it counts as a consistency fault.
#[must_use]
pub fn cache_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
