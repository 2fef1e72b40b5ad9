//! Customer persistence and balance reads.

use std::sync::Mutex;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use fiado_core::customer::{CreateCustomerInput, Customer, CustomerError, RateType};
use fiado_core::ledger::CustomerBalances;
use fiado_core::projection::{BalanceProjector, BalanceView};
use fiado_shared::{AppResult, CustomerId};

use crate::{CustomerRecord, Store};

/// Partial update for a customer. `None` fields are left unchanged.
///
/// Cached balances are deliberately not updatable here; they are only ever
/// written on the recompute path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerInput {
    /// New name.
    pub name: Option<String>,
    /// New phone number (`Some(None)` clears it).
    pub phone: Option<Option<String>>,
    /// New notes (`Some(None)` clears them).
    pub notes: Option<Option<String>>,
    /// New rate type. When switching to Manual a `custom_rate` must come
    /// along; switching away from Manual clears it.
    pub rate_type: Option<RateType>,
    /// New custom rate.
    pub custom_rate: Option<Decimal>,
    /// Activate/deactivate the customer.
    pub is_active: Option<bool>,
}

impl Store {
    /// Creates a new customer.
    pub fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        let customer = Customer::new(input)?;
        let id = customer.id;
        self.customers.insert(
            id,
            Mutex::new(CustomerRecord {
                customer: customer.clone(),
                log: Vec::new(),
            }),
        );
        Ok(customer)
    }

    /// Returns a customer by id.
    pub fn get_customer(&self, id: CustomerId) -> AppResult<Customer> {
        self.with_record(id, |record| Ok(record.customer.clone()))
    }

    /// Returns all customers, active and inactive.
    #[must_use]
    pub fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .filter_map(|entry| entry.value().lock().ok().map(|r| r.customer.clone()))
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        customers
    }

    /// Applies a partial update to a customer.
    pub fn update_customer(&self, id: CustomerId, update: UpdateCustomerInput) -> AppResult<Customer> {
        self.with_record(id, |record| {
            let customer = &mut record.customer;

            let rate_type = update.rate_type.unwrap_or(customer.rate_type);
            let custom_rate = match rate_type {
                RateType::Manual => update.custom_rate.or(customer.custom_rate),
                _ => None,
            };
            match (rate_type, custom_rate) {
                (RateType::Manual, None) => {
                    return Err(CustomerError::MissingCustomRate.into());
                }
                (RateType::Manual, Some(rate)) if rate <= Decimal::ZERO => {
                    return Err(CustomerError::NonPositiveCustomRate.into());
                }
                _ => {}
            }
            if update.rate_type.is_none()
                && update.custom_rate.is_some()
                && customer.rate_type != RateType::Manual
            {
                return Err(CustomerError::CustomRateOutsideManual.into());
            }

            if let Some(name) = update.name {
                if name.trim().is_empty() {
                    return Err(CustomerError::BlankName.into());
                }
                customer.name = name;
            }
            if let Some(phone) = update.phone {
                customer.phone = phone;
            }
            if let Some(notes) = update.notes {
                customer.notes = notes;
            }
            customer.rate_type = rate_type;
            customer.custom_rate = custom_rate;
            if let Some(is_active) = update.is_active {
                customer.is_active = is_active;
            }

            Ok(customer.clone())
        })
    }

    /// Returns a customer's outstanding balances under the requested view.
    ///
    /// The cached balances are verified against a fresh recompute first; on
    /// disagreement (a consistency fault that should never occur) the cache
    /// is overwritten with the fresh values rather than trusted.
    pub fn balances(&self, id: CustomerId, view: BalanceView) -> AppResult<CustomerBalances> {
        self.with_record(id, |record| {
            if let Err(fault) = record.customer.balances.verify_cached(&record.log) {
                warn!(customer_id = %id, error = %fault, "balance cache drift, forcing recompute");
                record.customer.balances = CustomerBalances::derive(&record.log);
            }
            Ok(BalanceProjector::project(
                &record.customer.balances,
                &record.log,
                view,
            ))
        })
    }
}
