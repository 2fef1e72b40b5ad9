//! Customer aggregate.
//!
//! A customer carries the three cached currency balances and the rate type
//! used when locking reference rates on new transactions. Cached balances
//! are only ever written on the recompute path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fiado_shared::{AppError, CustomerId};

use crate::ledger::CustomerBalances;
use crate::rate::RateKind;

/// Which reference rate applies when converting this customer's debt to
/// bolivars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// BCV USD reference rate.
    BcvUsd,
    /// BCV EUR reference rate.
    BcvEur,
    /// A fixed rate agreed with the customer.
    Manual,
}

/// Errors for customer creation and update.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Name cannot be blank.
    #[error("Customer name cannot be blank")]
    BlankName,

    /// A manual rate type needs a custom rate.
    #[error("A custom rate is required for the manual rate type")]
    MissingCustomRate,

    /// A custom rate only makes sense with the manual rate type.
    #[error("custom_rate is only valid for the manual rate type")]
    CustomRateOutsideManual,

    /// The custom rate must be positive.
    #[error("The custom rate must be positive")]
    NonPositiveCustomRate,
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Input for creating a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    /// Customer name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Rate type for bolivar conversion.
    pub rate_type: RateType,
    /// Fixed agreed rate; required iff `rate_type` is Manual.
    pub custom_rate: Option<Decimal>,
}

/// A customer with an accounts-receivable ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer id.
    pub id: CustomerId,
    /// Customer name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Rate type for bolivar conversion.
    pub rate_type: RateType,
    /// Fixed agreed rate (manual rate type only).
    pub custom_rate: Option<Decimal>,
    /// Opaque revocable token for read-only external access.
    pub share_token: Option<String>,
    /// Whether the customer is active.
    pub is_active: bool,
    /// Cached balances; always equal to a fresh recompute of the log.
    pub balances: CustomerBalances,
}

impl Customer {
    /// Validates the input and creates a new active customer with zero
    /// balances and no share token.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError` on a blank name or an inconsistent
    /// rate-type/custom-rate pair.
    pub fn new(input: CreateCustomerInput) -> Result<Self, CustomerError> {
        if input.name.trim().is_empty() {
            return Err(CustomerError::BlankName);
        }
        match (input.rate_type, input.custom_rate) {
            (RateType::Manual, None) => return Err(CustomerError::MissingCustomRate),
            (RateType::Manual, Some(rate)) if rate <= Decimal::ZERO => {
                return Err(CustomerError::NonPositiveCustomRate);
            }
            (RateType::Manual, Some(_)) => {}
            (_, Some(_)) => return Err(CustomerError::CustomRateOutsideManual),
            (_, None) => {}
        }

        Ok(Self {
            id: CustomerId::new(),
            name: input.name,
            phone: input.phone,
            notes: input.notes,
            rate_type: input.rate_type,
            custom_rate: input.custom_rate,
            share_token: None,
            is_active: true,
            balances: CustomerBalances::zero(),
        })
    }

    /// The reference rate kind to query for this customer, or `None` for
    /// manual-rate customers (their rate comes from `custom_rate`).
    #[must_use]
    pub fn rate_kind(&self) -> Option<RateKind> {
        match self.rate_type {
            RateType::BcvUsd => Some(RateKind::BcvUsd),
            RateType::BcvEur => Some(RateKind::BcvEur),
            RateType::Manual => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(rate_type: RateType, custom_rate: Option<Decimal>) -> CreateCustomerInput {
        CreateCustomerInput {
            name: "Panaderia Central".to_string(),
            phone: Some("+58 412 5550123".to_string()),
            notes: None,
            rate_type,
            custom_rate,
        }
    }

    #[test]
    fn test_new_customer_starts_clean() {
        let customer = Customer::new(input(RateType::BcvUsd, None)).unwrap();
        assert!(customer.is_active);
        assert!(customer.share_token.is_none());
        assert_eq!(customer.balances, CustomerBalances::zero());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut bad = input(RateType::BcvUsd, None);
        bad.name = "   ".to_string();
        assert!(matches!(Customer::new(bad), Err(CustomerError::BlankName)));
    }

    #[test]
    fn test_manual_requires_custom_rate() {
        assert!(matches!(
            Customer::new(input(RateType::Manual, None)),
            Err(CustomerError::MissingCustomRate)
        ));
        assert!(Customer::new(input(RateType::Manual, Some(dec!(38.5)))).is_ok());
    }

    #[test]
    fn test_custom_rate_outside_manual_rejected() {
        assert!(matches!(
            Customer::new(input(RateType::BcvUsd, Some(dec!(40)))),
            Err(CustomerError::CustomRateOutsideManual)
        ));
    }

    #[test]
    fn test_non_positive_custom_rate_rejected() {
        assert!(matches!(
            Customer::new(input(RateType::Manual, Some(dec!(0)))),
            Err(CustomerError::NonPositiveCustomRate)
        ));
    }

    #[test]
    fn test_rate_kind() {
        let usd = Customer::new(input(RateType::BcvUsd, None)).unwrap();
        assert_eq!(usd.rate_kind(), Some(RateKind::BcvUsd));

        let eur = Customer::new(input(RateType::BcvEur, None)).unwrap();
        assert_eq!(eur.rate_kind(), Some(RateKind::BcvEur));

        let manual = Customer::new(input(RateType::Manual, Some(dec!(38.5)))).unwrap();
        assert_eq!(manual.rate_kind(), None);
    }
}
