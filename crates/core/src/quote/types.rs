//! Quote domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fiado_shared::QuoteCode;

/// Which currency track(s) a quote's totals are computed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// BCV-bolivar pricing only.
    Bcv,
    /// Cash-USD pricing only; no bolivar total.
    Divisa,
    /// Both: BCV total plus an independent cash-USD total.
    Dual,
}

/// Quote lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Awaiting acceptance/settlement.
    Pending,
    /// Settled against the ledger.
    Settled,
}

/// Input for one quote line.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteItemInput {
    /// Item name as it appears on the document.
    pub name: String,
    /// Quantity (must be positive; fractional quantities are allowed).
    pub quantity: Decimal,
    /// Unit of measure (kg, saco, ...).
    pub unit: Option<String>,
    /// Unit price in the primary pricing currency (must be non-negative).
    pub unit_price_primary: Decimal,
    /// Unit price in the secondary currency for dual quotes. Falls back to
    /// the primary unit price when absent.
    pub unit_price_secondary: Option<Decimal>,
}

/// A priced quote line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Item name.
    pub name: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Unit price in the primary currency.
    pub unit_price_primary: Decimal,
    /// Rounded line total in the primary currency.
    pub line_primary: Decimal,
    /// Unit price in the secondary currency (dual quotes only).
    pub unit_price_secondary: Option<Decimal>,
    /// Rounded line total in the secondary currency (dual quotes only).
    pub line_secondary: Option<Decimal>,
}

/// Input for building or rebuilding a quote.
///
/// Edits pass a complete input again; the engine regenerates and atomically
/// overwrites the whole item/total set. There is no partial-item patching.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildQuoteInput {
    /// Quote lines (must be non-empty).
    pub items: Vec<QuoteItemInput>,
    /// Delivery fee added after the item totals (must be non-negative).
    #[serde(default)]
    pub delivery_fee: Decimal,
    /// Pricing mode. New writes always carry this explicitly.
    pub pricing_mode: PricingMode,
    /// Reference rate captured at creation; required unless the mode is
    /// Divisa.
    pub locked_rate: Option<Decimal>,
    /// Suppress bolivar amounts on rendered documents. Totals are still
    /// computed and stored regardless.
    #[serde(default)]
    pub hide_bs_on_documents: bool,
    /// Quote date.
    pub date: NaiveDate,
    /// Customer name printed on the document.
    pub customer_name: Option<String>,
    /// Customer address printed on the document.
    pub customer_address: Option<String>,
}

/// An itemized price estimate, typically linked to a ledger purchase once
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Short opaque code identifying the quote.
    pub code: QuoteCode,
    /// Quote date.
    pub date: NaiveDate,
    /// Priced lines.
    pub items: Vec<QuoteItem>,
    /// Rounded sum of line totals plus delivery fee, primary currency.
    pub total_primary: Decimal,
    /// Secondary-currency total; set only for dual quotes.
    pub total_secondary: Option<Decimal>,
    /// Bolivar total at the locked rate; zero for divisa quotes.
    pub total_bs: Decimal,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Pricing mode.
    pub pricing_mode: PricingMode,
    /// Suppress bolivar amounts on rendered documents.
    pub hide_bs_on_documents: bool,
    /// Lifecycle status.
    pub status: QuoteStatus,
    /// Customer name on the document.
    pub customer_name: Option<String>,
    /// Customer address on the document.
    pub customer_address: Option<String>,
    /// Reference rate captured at creation.
    pub locked_rate: Option<Decimal>,
    /// Set once a document for this quote has been issued externally.
    /// Ledger transactions linked to such a quote cannot be deleted.
    pub externally_referenced: bool,
}
