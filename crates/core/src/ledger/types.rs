//! Ledger domain types for transaction creation and editing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fiado_shared::{CustomerId, QuoteCode, TransactionId};

/// Currency track a debt or payment is denominated in.
///
/// The three tracks are independent: a customer carries one running balance
/// per track and settles each in its own currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyTrack {
    /// Cash US dollars, independent of the bolivar exchange rate.
    Divisas,
    /// USD-denominated debt settled in bolivars at the BCV USD reference rate.
    BcvUsd,
    /// EUR-denominated debt settled in bolivars at the BCV EUR reference rate.
    BcvEur,
}

impl std::fmt::Display for CurrencyTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Divisas => write!(f, "divisas"),
            Self::BcvUsd => write!(f, "bcv_usd"),
            Self::BcvEur => write!(f, "bcv_eur"),
        }
    }
}

/// Transaction kind: a purchase adds to the customer's debt, a payment
/// reduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    /// Goods delivered on credit.
    Purchase,
    /// Money received from the customer.
    Payment,
}

/// A single ledger transaction.
///
/// Invariants (enforced by [`validate_amounts`](super::validation::validate_amounts)):
/// - `amount_secondary` is non-null only for `CurrencyTrack::BcvUsd` purchases
/// - `amount_primary > 0` or `amount_bs > 0` (never both zero)
/// - all amounts are non-negative
///
/// `customer_id` is immutable after creation; edits replace every other
/// mutable field as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id.
    pub id: TransactionId,
    /// Owning customer (immutable).
    pub customer_id: CustomerId,
    /// Purchase or payment.
    pub kind: TxKind,
    /// Calendar day the transaction happened.
    pub date: NaiveDate,
    /// Operator-facing description.
    pub description: String,
    /// Authoritative amount in the track's primary currency.
    pub amount_primary: Decimal,
    /// Informational bolivar amount (display only, never summed).
    pub amount_bs: Decimal,
    /// Cash-USD expression of a dual BCV-USD debt.
    pub amount_secondary: Option<Decimal>,
    /// Currency track this transaction is counted on.
    pub currency_track: CurrencyTrack,
    /// Linked quote, when the purchase came from an accepted quote.
    pub quote_ref: Option<QuoteCode>,
    /// How a payment was made (transfer, cash, ...).
    pub payment_method: Option<String>,
    /// Reference rate captured at creation, never re-queried.
    pub locked_rate: Option<Decimal>,
    /// Whether the purchase has been settled.
    pub is_settled: bool,
    /// How the purchase was settled.
    pub settle_method: Option<String>,
    /// When the purchase was settled.
    pub settle_date: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl Transaction {
    /// Returns true if this is a dual transaction: a BCV-USD purchase whose
    /// debt is simultaneously expressed as a cash-USD amount.
    #[must_use]
    pub fn is_dual(&self) -> bool {
        self.currency_track == CurrencyTrack::BcvUsd && self.amount_secondary.is_some()
    }

    /// Returns true if this transaction currently counts toward the
    /// outstanding balance of its track.
    ///
    /// Settled purchases drop out entirely; payments always count.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        match self.kind {
            TxKind::Purchase => !self.is_settled,
            TxKind::Payment => true,
        }
    }
}

/// Input for creating a new transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionInput {
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Purchase or payment.
    pub kind: TxKind,
    /// Calendar day of the transaction.
    pub date: NaiveDate,
    /// Operator-facing description.
    pub description: String,
    /// Amount in the track's primary currency.
    pub amount_primary: Decimal,
    /// Informational bolivar amount.
    #[serde(default)]
    pub amount_bs: Decimal,
    /// Cash-USD expression for a dual BCV-USD debt.
    pub amount_secondary: Option<Decimal>,
    /// Currency track.
    pub currency_track: CurrencyTrack,
    /// Linked quote, if any.
    pub quote_ref: Option<QuoteCode>,
    /// Payment method, if a payment.
    pub payment_method: Option<String>,
    /// Reference rate captured at creation.
    pub locked_rate: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Input for editing an existing transaction.
///
/// Edits replace the whole mutable field set; there is no partial patching.
/// `customer_id` cannot be changed, which is why it does not appear here.
#[derive(Debug, Clone, Deserialize)]
pub struct EditTransactionInput {
    /// Purchase or payment.
    pub kind: TxKind,
    /// Calendar day of the transaction.
    pub date: NaiveDate,
    /// Operator-facing description.
    pub description: String,
    /// Amount in the track's primary currency.
    pub amount_primary: Decimal,
    /// Informational bolivar amount.
    #[serde(default)]
    pub amount_bs: Decimal,
    /// Cash-USD expression for a dual BCV-USD debt.
    pub amount_secondary: Option<Decimal>,
    /// Currency track. Edits may reclassify a transaction onto another
    /// track, which is why balance recompute is always a full re-derivation.
    pub currency_track: CurrencyTrack,
    /// Linked quote, if any.
    pub quote_ref: Option<QuoteCode>,
    /// Payment method, if a payment.
    pub payment_method: Option<String>,
    /// Reference rate captured at creation.
    pub locked_rate: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
}
