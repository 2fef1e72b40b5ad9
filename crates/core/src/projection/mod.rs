//! Pure re-expression of outstanding balances across currency views.
//!
//! A dual debt can be settled either in bolivars at the BCV rate or in cash
//! dollars. The projector answers "what do the balances look like if every
//! dual debt were settled in cash" without mutating anything, so every
//! consumer (server API or future clients) shares one definition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fiado_shared::round2;

use crate::ledger::{CustomerBalances, Transaction};

/// Which currency view to project outstanding balances into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceView {
    /// Stored view: dual debts stay on the BCV-USD balance.
    #[default]
    Bcv,
    /// Cash view: dual debts move to the cash-USD balance at their
    /// secondary amount.
    Divisas,
}

/// Pure, non-mutating balance projector.
pub struct BalanceProjector;

impl BalanceProjector {
    /// Re-expresses stored balances under the requested view.
    ///
    /// `view = Bcv` returns the stored balances unchanged. `view = Divisas`
    /// moves every unsettled dual purchase from the BCV column (by its
    /// `amount_primary`) to the divisas column (by its `amount_secondary`).
    /// The euro balance is never affected, and a dual transaction
    /// contributes to exactly one numeric column per view.
    #[must_use]
    pub fn project(
        balances: &CustomerBalances,
        transactions: &[Transaction],
        view: BalanceView,
    ) -> CustomerBalances {
        match view {
            BalanceView::Bcv => *balances,
            BalanceView::Divisas => {
                let (dual_primary, dual_secondary) = Self::dual_sums(transactions);
                CustomerBalances {
                    divisas: round2(balances.divisas + dual_secondary),
                    bcv: round2(balances.bcv - dual_primary),
                    euro: balances.euro,
                }
            }
        }
    }

    /// Sums (`amount_primary`, `amount_secondary`) over the unsettled dual
    /// purchases of the log.
    fn dual_sums(transactions: &[Transaction]) -> (Decimal, Decimal) {
        transactions
            .iter()
            .filter(|tx| tx.is_dual() && tx.is_outstanding())
            .fold((Decimal::ZERO, Decimal::ZERO), |(primary, secondary), tx| {
                (
                    primary + tx.amount_primary,
                    secondary + tx.amount_secondary.unwrap_or(Decimal::ZERO),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fiado_shared::{CustomerId, TransactionId};
    use rust_decimal_macros::dec;

    use crate::ledger::{CurrencyTrack, TxKind};

    fn tx(
        kind: TxKind,
        track: CurrencyTrack,
        primary: Decimal,
        secondary: Option<Decimal>,
        settled: bool,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            customer_id: CustomerId::new(),
            kind,
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            description: String::new(),
            amount_primary: primary,
            amount_bs: Decimal::ZERO,
            amount_secondary: secondary,
            currency_track: track,
            quote_ref: None,
            payment_method: None,
            locked_rate: None,
            is_settled: settled,
            settle_method: None,
            settle_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_bcv_view_is_identity() {
        let log = vec![tx(
            TxKind::Purchase,
            CurrencyTrack::BcvUsd,
            dec!(50),
            Some(dec!(40)),
            false,
        )];
        let stored = CustomerBalances::derive(&log);
        let projected = BalanceProjector::project(&stored, &log, BalanceView::Bcv);
        assert_eq!(projected, stored);
    }

    #[test]
    fn test_divisas_view_moves_dual_debt() {
        // Spec reference: A bcv 100, B dual 50/40 => bcv 150; divisas view
        // => bcv 100, divisas 40.
        let log = vec![
            tx(TxKind::Purchase, CurrencyTrack::BcvUsd, dec!(100), None, false),
            tx(
                TxKind::Purchase,
                CurrencyTrack::BcvUsd,
                dec!(50),
                Some(dec!(40)),
                false,
            ),
        ];
        let stored = CustomerBalances::derive(&log);
        assert_eq!(stored.bcv, dec!(150));

        let projected = BalanceProjector::project(&stored, &log, BalanceView::Divisas);
        assert_eq!(projected.bcv, dec!(100));
        assert_eq!(projected.divisas, dec!(40));
        assert_eq!(projected.euro, Decimal::ZERO);
    }

    #[test]
    fn test_settled_dual_does_not_project() {
        let log = vec![tx(
            TxKind::Purchase,
            CurrencyTrack::BcvUsd,
            dec!(50),
            Some(dec!(40)),
            true,
        )];
        let stored = CustomerBalances::derive(&log);
        assert_eq!(stored.bcv, Decimal::ZERO);

        let projected = BalanceProjector::project(&stored, &log, BalanceView::Divisas);
        assert_eq!(projected, stored);
    }

    #[test]
    fn test_non_dual_transactions_unaffected() {
        let log = vec![
            tx(TxKind::Purchase, CurrencyTrack::Divisas, dec!(70), None, false),
            tx(TxKind::Purchase, CurrencyTrack::BcvEur, dec!(30), None, false),
            tx(TxKind::Purchase, CurrencyTrack::BcvUsd, dec!(20), None, false),
        ];
        let stored = CustomerBalances::derive(&log);
        let projected = BalanceProjector::project(&stored, &log, BalanceView::Divisas);
        assert_eq!(projected, stored);
    }

    #[test]
    fn test_euro_balance_never_moves() {
        let log = vec![
            tx(TxKind::Purchase, CurrencyTrack::BcvEur, dec!(99), None, false),
            tx(
                TxKind::Purchase,
                CurrencyTrack::BcvUsd,
                dec!(10),
                Some(dec!(8)),
                false,
            ),
        ];
        let stored = CustomerBalances::derive(&log);
        let projected = BalanceProjector::project(&stored, &log, BalanceView::Divisas);
        assert_eq!(projected.euro, dec!(99));
    }
}

#[cfg(test)]
mod props {
    use super::*;
    use chrono::NaiveDate;
    use fiado_shared::{CustomerId, TransactionId};
    use proptest::prelude::*;

    use crate::ledger::{CurrencyTrack, TxKind};

    fn positive_amount() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn dual_purchase() -> impl Strategy<Value = Transaction> {
        (positive_amount(), positive_amount(), proptest::bool::ANY).prop_map(
            |(primary, secondary, settled)| Transaction {
                id: TransactionId::new(),
                customer_id: CustomerId::new(),
                kind: TxKind::Purchase,
                date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
                description: String::new(),
                amount_primary: primary,
                amount_bs: Decimal::ZERO,
                amount_secondary: Some(secondary),
                currency_track: CurrencyTrack::BcvUsd,
                quote_ref: None,
                payment_method: None,
                locked_rate: None,
                is_settled: settled,
                settle_method: None,
                settle_date: None,
                notes: None,
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For every unsettled dual purchase, the amount removed from the
        /// BCV view equals its primary and the amount added to the divisas
        /// view equals its secondary. No double counting across views.
        #[test]
        fn prop_dual_counts_in_exactly_one_column(
            log in proptest::collection::vec(dual_purchase(), 1..16),
        ) {
            let stored = CustomerBalances::derive(&log);
            let projected = BalanceProjector::project(&stored, &log, BalanceView::Divisas);

            let expected_primary: Decimal = log
                .iter()
                .filter(|tx| !tx.is_settled)
                .map(|tx| tx.amount_primary)
                .sum();
            let expected_secondary: Decimal = log
                .iter()
                .filter(|tx| !tx.is_settled)
                .filter_map(|tx| tx.amount_secondary)
                .sum();

            prop_assert_eq!(stored.bcv - projected.bcv, expected_primary);
            prop_assert_eq!(projected.divisas - stored.divisas, expected_secondary);
            prop_assert_eq!(projected.euro, stored.euro);
        }

        /// The projector never mutates its inputs.
        #[test]
        fn prop_projection_is_pure(
            log in proptest::collection::vec(dual_purchase(), 0..16),
        ) {
            let stored = CustomerBalances::derive(&log);
            let snapshot = log.clone();

            let _ = BalanceProjector::project(&stored, &log, BalanceView::Divisas);
            let _ = BalanceProjector::project(&stored, &log, BalanceView::Bcv);

            prop_assert_eq!(log, snapshot.clone());
            prop_assert_eq!(CustomerBalances::derive(&snapshot), stored);
        }
    }
}
