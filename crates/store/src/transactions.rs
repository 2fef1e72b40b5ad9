//! Transaction persistence: apply, edit, delete, settle, unsettle.
//!
//! Every mutation runs under the owning customer's record lock and ends
//! with a full balance recompute written back to the cache, so a subsequent
//! read of the customer always observes the transaction and its balance
//! effect together.

use chrono::NaiveDate;
use tracing::info;

use fiado_core::ledger::{
    CreateTransactionInput, CustomerBalances, EditTransactionInput, LedgerError, LedgerService,
    Transaction,
};
use fiado_shared::{AppError, AppResult, CustomerId, TransactionId};

use crate::{CustomerRecord, Store};

impl Store {
    /// Validates, appends, and recomputes.
    pub fn add_transaction(&self, input: CreateTransactionInput) -> AppResult<Transaction> {
        let customer_id = input.customer_id;
        let tx = self.with_record(customer_id, |record| {
            let tx = LedgerService::build(input)?;
            record.log.push(tx.clone());
            Self::recompute_cache(record);
            Ok(tx)
        })?;
        self.tx_index.insert(tx.id, customer_id);
        info!(customer_id = %customer_id, tx_id = %tx.id, kind = ?tx.kind, "transaction recorded");
        Ok(tx)
    }

    /// Returns one customer's transaction log in insertion order.
    pub fn transactions(&self, customer_id: CustomerId) -> AppResult<Vec<Transaction>> {
        self.with_record(customer_id, |record| Ok(record.log.clone()))
    }

    /// Returns a single transaction.
    pub fn get_transaction(&self, tx_id: TransactionId) -> AppResult<Transaction> {
        let customer_id = self.owner_of(tx_id)?;
        self.with_record(customer_id, |record| {
            Ok(Self::find(record, tx_id)?.clone())
        })
    }

    /// Applies a full-field edit and recomputes.
    ///
    /// The edit may reclassify the currency track; the recompute is a full
    /// re-derivation so the old track's balance sheds the amount and the
    /// new track's gains it.
    pub fn edit_transaction(
        &self,
        tx_id: TransactionId,
        edit: EditTransactionInput,
    ) -> AppResult<Transaction> {
        let customer_id = self.owner_of(tx_id)?;
        self.with_record(customer_id, |record| {
            let tx = Self::find_mut(record, tx_id)?;
            LedgerService::apply_edit(tx, edit)?;
            let edited = tx.clone();
            Self::recompute_cache(record);
            Ok(edited)
        })
    }

    /// Deletes a transaction and recomputes.
    ///
    /// Rejected while the transaction's quote is flagged as externally
    /// referenced; balances are left unchanged in that case.
    pub fn delete_transaction(&self, tx_id: TransactionId) -> AppResult<()> {
        let customer_id = self.owner_of(tx_id)?;
        self.with_record(customer_id, |record| {
            let tx = Self::find(record, tx_id)?;
            LedgerService::validate_can_delete(tx, |code| {
                self.quotes
                    .get(code.as_str())
                    .is_some_and(|quote| quote.externally_referenced)
            })?;
            record.log.retain(|t| t.id != tx_id);
            Self::recompute_cache(record);
            Ok(())
        })?;
        self.tx_index.remove(&tx_id);
        info!(customer_id = %customer_id, tx_id = %tx_id, "transaction deleted");
        Ok(())
    }

    /// Settles a purchase and recomputes.
    pub fn settle_transaction(
        &self,
        tx_id: TransactionId,
        method: Option<String>,
        date: NaiveDate,
    ) -> AppResult<Transaction> {
        let customer_id = self.owner_of(tx_id)?;
        self.with_record(customer_id, |record| {
            let tx = Self::find_mut(record, tx_id)?;
            LedgerService::settle(tx, method, date)?;
            let settled = tx.clone();
            Self::recompute_cache(record);
            Ok(settled)
        })
    }

    /// Reverts a settlement and recomputes.
    pub fn unsettle_transaction(&self, tx_id: TransactionId) -> AppResult<Transaction> {
        let customer_id = self.owner_of(tx_id)?;
        self.with_record(customer_id, |record| {
            let tx = Self::find_mut(record, tx_id)?;
            LedgerService::unsettle(tx)?;
            let unsettled = tx.clone();
            Self::recompute_cache(record);
            Ok(unsettled)
        })
    }

    fn recompute_cache(record: &mut CustomerRecord) {
        record.customer.balances = CustomerBalances::derive(&record.log);
    }

    fn find(record: &CustomerRecord, tx_id: TransactionId) -> Result<&Transaction, AppError> {
        record
            .log
            .iter()
            .find(|t| t.id == tx_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(tx_id).into())
    }

    fn find_mut(
        record: &mut CustomerRecord,
        tx_id: TransactionId,
    ) -> Result<&mut Transaction, AppError> {
        record
            .log
            .iter_mut()
            .find(|t| t.id == tx_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(tx_id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiado_core::customer::{CreateCustomerInput, RateType};
    use fiado_core::ledger::{CurrencyTrack, TxKind};
    use fiado_core::projection::BalanceView;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn customer(store: &Store) -> CustomerId {
        store
            .create_customer(CreateCustomerInput {
                name: "Ferreteria Andina".to_string(),
                phone: None,
                notes: None,
                rate_type: RateType::BcvUsd,
                custom_rate: None,
            })
            .unwrap()
            .id
    }

    fn purchase_input(customer_id: CustomerId, primary: Decimal) -> CreateTransactionInput {
        CreateTransactionInput {
            customer_id,
            kind: TxKind::Purchase,
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            description: "tubing".to_string(),
            amount_primary: primary,
            amount_bs: Decimal::ZERO,
            amount_secondary: None,
            currency_track: CurrencyTrack::BcvUsd,
            quote_ref: None,
            payment_method: None,
            locked_rate: Some(dec!(40)),
            notes: None,
        }
    }

    #[test]
    fn test_add_updates_cached_balance() {
        let store = Store::new();
        let id = customer(&store);
        store.add_transaction(purchase_input(id, dec!(100))).unwrap();

        assert_eq!(store.get_customer(id).unwrap().balances.bcv, dec!(100));
        assert_eq!(store.balances(id, BalanceView::Bcv).unwrap().bcv, dec!(100));
    }

    #[test]
    fn test_add_for_unknown_customer_fails() {
        let store = Store::new();
        let err = store
            .add_transaction(purchase_input(CustomerId::new(), dec!(1)))
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_invalid_transaction_persists_nothing() {
        let store = Store::new();
        let id = customer(&store);
        let mut input = purchase_input(id, Decimal::ZERO);
        input.amount_bs = Decimal::ZERO;

        assert!(store.add_transaction(input).is_err());
        assert!(store.transactions(id).unwrap().is_empty());
        assert_eq!(store.get_customer(id).unwrap().balances.bcv, Decimal::ZERO);
    }

    #[test]
    fn test_edit_reclassifies_track() {
        let store = Store::new();
        let id = customer(&store);
        let tx = store.add_transaction(purchase_input(id, dec!(80))).unwrap();

        store
            .edit_transaction(
                tx.id,
                EditTransactionInput {
                    kind: TxKind::Purchase,
                    date: tx.date,
                    description: tx.description.clone(),
                    amount_primary: dec!(80),
                    amount_bs: Decimal::ZERO,
                    amount_secondary: None,
                    currency_track: CurrencyTrack::Divisas,
                    quote_ref: None,
                    payment_method: None,
                    locked_rate: tx.locked_rate,
                    notes: None,
                },
            )
            .unwrap();

        let balances = store.get_customer(id).unwrap().balances;
        assert_eq!(balances.bcv, Decimal::ZERO);
        assert_eq!(balances.divisas, dec!(80));
    }

    #[test]
    fn test_settle_and_unsettle_roundtrip_balances() {
        let store = Store::new();
        let id = customer(&store);
        let tx = store.add_transaction(purchase_input(id, dec!(60))).unwrap();
        let before = store.get_customer(id).unwrap().balances;

        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        store
            .settle_transaction(tx.id, Some("transfer".to_string()), date)
            .unwrap();
        assert_eq!(store.get_customer(id).unwrap().balances.bcv, Decimal::ZERO);

        store.unsettle_transaction(tx.id).unwrap();
        assert_eq!(store.get_customer(id).unwrap().balances, before);
    }

    #[test]
    fn test_double_settle_is_invalid_state() {
        let store = Store::new();
        let id = customer(&store);
        let tx = store.add_transaction(purchase_input(id, dec!(60))).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        store.settle_transaction(tx.id, None, date).unwrap();

        let err = store.settle_transaction(tx.id, None, date).unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_delete_removes_from_balances_and_index() {
        let store = Store::new();
        let id = customer(&store);
        let tx = store.add_transaction(purchase_input(id, dec!(45))).unwrap();

        store.delete_transaction(tx.id).unwrap();
        assert_eq!(store.get_customer(id).unwrap().balances.bcv, Decimal::ZERO);
        assert_eq!(store.get_transaction(tx.id).unwrap_err().status_code(), 404);
    }
}
