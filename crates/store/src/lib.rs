//! In-memory persistence collaborator for Fiado.
//!
//! Every customer record (the customer plus its insertion-ordered
//! transaction log) lives behind its own mutex, so all mutations to one
//! customer are serialized and the recomputed balances are observable as a
//! unit to subsequent reads (read-your-writes). There is deliberately no
//! cross-customer transactionality.

pub mod customers;
pub mod quotes;
pub mod share;
pub mod transactions;

pub use customers::UpdateCustomerInput;

use std::sync::Mutex;

use dashmap::DashMap;

use fiado_core::customer::Customer;
use fiado_core::ledger::{LedgerError, Transaction};
use fiado_core::quote::Quote;
use fiado_shared::{AppError, AppResult, CustomerId, TransactionId};

/// One customer's persisted state: the aggregate and its transaction log.
#[derive(Debug)]
pub(crate) struct CustomerRecord {
    pub(crate) customer: Customer,
    /// Insertion-ordered transaction log.
    pub(crate) log: Vec<Transaction>,
}

/// The in-memory store.
///
/// Maps are sharded (`DashMap`), so unrelated customers never contend.
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) customers: DashMap<CustomerId, Mutex<CustomerRecord>>,
    /// Quotes keyed by their short code.
    pub(crate) quotes: DashMap<String, Quote>,
    /// Share-token index: token -> customer.
    pub(crate) tokens: DashMap<String, CustomerId>,
    /// Transaction index: transaction -> owning customer.
    pub(crate) tx_index: DashMap<TransactionId, CustomerId>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to one customer's record.
    ///
    /// This is the per-customer single-writer scope: every mutation of a
    /// customer's log or cached balances goes through here.
    pub(crate) fn with_record<T>(
        &self,
        id: CustomerId,
        f: impl FnOnce(&mut CustomerRecord) -> AppResult<T>,
    ) -> AppResult<T> {
        let entry = self
            .customers
            .get(&id)
            .ok_or_else(|| AppError::from(LedgerError::CustomerNotFound(id)))?;
        let mut record = entry
            .lock()
            .map_err(|_| AppError::Internal(format!("customer record lock poisoned: {id}")))?;
        f(&mut record)
    }

    /// Resolves a transaction id to its owning customer.
    pub(crate) fn owner_of(&self, tx_id: TransactionId) -> AppResult<CustomerId> {
        self.tx_index
            .get(&tx_id)
            .map(|entry| *entry.value())
            .ok_or_else(|| AppError::from(LedgerError::TransactionNotFound(tx_id)))
    }
}
