//! Ledger service: transaction assembly and state transitions.
//!
//! Pure business logic with no storage dependencies. The store calls these
//! functions under its per-customer lock and recomputes balances afterwards.

use chrono::NaiveDate;

use fiado_shared::{QuoteCode, TransactionId};

use super::error::LedgerError;
use super::types::{CreateTransactionInput, EditTransactionInput, Transaction, TxKind};
use super::validation::validate_amounts;

/// Ledger service for transaction assembly and state transitions.
pub struct LedgerService;

impl LedgerService {
    /// Validates a creation input and assembles a new transaction.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the amount invariants are violated.
    pub fn build(input: CreateTransactionInput) -> Result<Transaction, LedgerError> {
        validate_amounts(
            input.kind,
            input.currency_track,
            input.amount_primary,
            input.amount_bs,
            input.amount_secondary,
        )?;

        Ok(Transaction {
            id: TransactionId::new(),
            customer_id: input.customer_id,
            kind: input.kind,
            date: input.date,
            description: input.description,
            amount_primary: input.amount_primary,
            amount_bs: input.amount_bs,
            amount_secondary: input.amount_secondary,
            currency_track: input.currency_track,
            quote_ref: input.quote_ref,
            payment_method: input.payment_method,
            locked_rate: input.locked_rate,
            is_settled: false,
            settle_method: None,
            settle_date: None,
            notes: input.notes,
        })
    }

    /// Applies a full-field edit to an existing transaction.
    ///
    /// `customer_id` and the settle state are untouched; everything else is
    /// replaced as a unit. The caller must recompute balances afterwards
    /// because the edit may have reclassified the currency track.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the edited amounts violate the invariants;
    /// the transaction is left unchanged in that case.
    pub fn apply_edit(
        tx: &mut Transaction,
        edit: EditTransactionInput,
    ) -> Result<(), LedgerError> {
        validate_amounts(
            edit.kind,
            edit.currency_track,
            edit.amount_primary,
            edit.amount_bs,
            edit.amount_secondary,
        )?;

        tx.kind = edit.kind;
        tx.date = edit.date;
        tx.description = edit.description;
        tx.amount_primary = edit.amount_primary;
        tx.amount_bs = edit.amount_bs;
        tx.amount_secondary = edit.amount_secondary;
        tx.currency_track = edit.currency_track;
        tx.quote_ref = edit.quote_ref;
        tx.payment_method = edit.payment_method;
        tx.locked_rate = edit.locked_rate;
        tx.notes = edit.notes;
        Ok(())
    }

    /// Settles a purchase, removing it from the outstanding sums.
    ///
    /// # Errors
    ///
    /// Returns `NotAPurchase` for payments and `AlreadySettled` for a
    /// purchase that is already settled.
    pub fn settle(
        tx: &mut Transaction,
        method: Option<String>,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        if tx.kind != TxKind::Purchase {
            return Err(LedgerError::NotAPurchase(tx.id));
        }
        if tx.is_settled {
            return Err(LedgerError::AlreadySettled(tx.id));
        }
        tx.is_settled = true;
        tx.settle_method = method;
        tx.settle_date = Some(date);
        Ok(())
    }

    /// Reverts a settlement, restoring the purchase to the outstanding sums.
    ///
    /// # Errors
    ///
    /// Returns `NotSettled` if the transaction is not currently settled.
    pub fn unsettle(tx: &mut Transaction) -> Result<(), LedgerError> {
        if !tx.is_settled {
            return Err(LedgerError::NotSettled(tx.id));
        }
        tx.is_settled = false;
        tx.settle_method = None;
        tx.settle_date = None;
        Ok(())
    }

    /// Validates that a transaction can be deleted.
    ///
    /// The externally-referenced check is injected because quote storage is
    /// a collaborator of the ledger, not part of it.
    ///
    /// # Errors
    ///
    /// Returns `QuoteExternallyReferenced` while the linked quote is flagged
    /// as externally referenced.
    pub fn validate_can_delete<F>(
        tx: &Transaction,
        is_externally_referenced: F,
    ) -> Result<(), LedgerError>
    where
        F: Fn(&QuoteCode) -> bool,
    {
        if let Some(quote_ref) = &tx.quote_ref {
            if is_externally_referenced(quote_ref) {
                return Err(LedgerError::QuoteExternallyReferenced(tx.id));
            }
        }
        Ok(())
    }
}
