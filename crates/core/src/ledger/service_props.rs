//! Property-based tests for the ledger.
//!
//! - Recompute idempotence over arbitrary logs
//! - Settle/unsettle round trip restores the exact prior balances
//! - Payments always subtract, purchases add only while unsettled

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use fiado_shared::{CustomerId, TransactionId};

use super::balance::CustomerBalances;
use super::service::LedgerService;
use super::types::{CurrencyTrack, Transaction, TxKind};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn track_strategy() -> impl Strategy<Value = CurrencyTrack> {
    prop_oneof![
        Just(CurrencyTrack::Divisas),
        Just(CurrencyTrack::BcvUsd),
        Just(CurrencyTrack::BcvEur),
    ]
}

fn kind_strategy() -> impl Strategy<Value = TxKind> {
    prop_oneof![Just(TxKind::Purchase), Just(TxKind::Payment)]
}

/// Strategy for one well-formed transaction. Dual secondary amounts only
/// appear on BCV-USD purchases, matching the validation invariants.
fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        kind_strategy(),
        track_strategy(),
        positive_amount(),
        proptest::option::of(positive_amount()),
        proptest::bool::ANY,
    )
        .prop_map(|(kind, track, primary, secondary, settled)| {
            let secondary = match (kind, track) {
                (TxKind::Purchase, CurrencyTrack::BcvUsd) => secondary,
                _ => None,
            };
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
                is_settled: kind == TxKind::Purchase && settled,
                settle_method: None,
                settle_date: None,
                notes: None,
            }
        })
}

fn log_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    proptest::collection::vec(transaction_strategy(), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Re-running the recompute without new transactions yields identical
    /// balances.
    #[test]
    fn prop_recompute_idempotent(log in log_strategy()) {
        let first = CustomerBalances::derive(&log);
        let second = CustomerBalances::derive(&log);
        prop_assert_eq!(first, second);
    }

    /// A freshly derived cache always verifies against its own log.
    #[test]
    fn prop_fresh_cache_verifies(log in log_strategy()) {
        let cached = CustomerBalances::derive(&log);
        prop_assert!(cached.verify_cached(&log).is_ok());
    }

    /// Settling then unsettling the same purchase restores the exact
    /// pre-settle balances.
    #[test]
    fn prop_settle_unsettle_restores_balances(
        mut log in log_strategy(),
        extra in transaction_strategy(),
    ) {
        // Ensure there is at least one unsettled purchase to exercise.
        let mut target = extra;
        target.kind = TxKind::Purchase;
        target.is_settled = false;
        if target.currency_track != CurrencyTrack::BcvUsd {
            target.amount_secondary = None;
        }
        log.push(target);
        let idx = log.len() - 1;

        let before = CustomerBalances::derive(&log);

        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        LedgerService::settle(&mut log[idx], None, date).unwrap();
        let during = CustomerBalances::derive(&log);
        prop_assert_ne!(before, during, "settling must move the balance");

        LedgerService::unsettle(&mut log[idx]).unwrap();
        let after = CustomerBalances::derive(&log);
        prop_assert_eq!(before, after);
    }

    /// Settling a purchase reduces its track's balance by exactly its
    /// primary amount.
    #[test]
    fn prop_settle_removes_exactly_primary(
        mut log in log_strategy(),
        extra in transaction_strategy(),
    ) {
        let mut target = extra;
        target.kind = TxKind::Purchase;
        target.is_settled = false;
        if target.currency_track != CurrencyTrack::BcvUsd {
            target.amount_secondary = None;
        }
        let track = target.currency_track;
        let primary = target.amount_primary;
        log.push(target);
        let idx = log.len() - 1;

        let before = CustomerBalances::derive(&log).for_track(track);
        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        LedgerService::settle(&mut log[idx], None, date).unwrap();
        let after = CustomerBalances::derive(&log).for_track(track);

        prop_assert_eq!(before - after, primary);
    }

    /// Payments subtract from their track even with no matching purchase.
    #[test]
    fn prop_payment_always_subtracts(
        amount in positive_amount(),
        track in track_strategy(),
    ) {
        let payment = Transaction {
            id: TransactionId::new(),
            customer_id: CustomerId::new(),
            kind: TxKind::Payment,
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            description: String::new(),
            amount_primary: amount,
            amount_bs: Decimal::ZERO,
            amount_secondary: None,
            currency_track: track,
            quote_ref: None,
            payment_method: None,
            locked_rate: None,
            is_settled: false,
            settle_method: None,
            settle_date: None,
            notes: None,
        };
        let balances = CustomerBalances::derive(&[payment]);
        prop_assert_eq!(balances.for_track(track), -amount);
    }
}
