//! Quote pricing engine.
//!
//! Pricing policy: each line is rounded on its own, totals are the rounded
//! sum of already-rounded lines plus the delivery fee (sum-then-round, not
//! round-then-sum), and the bolivar total is computed from the locked rate
//! captured at creation.

use rust_decimal::Decimal;

use fiado_shared::{QuoteCode, round2};

use super::error::QuoteError;
use super::types::{BuildQuoteInput, PricingMode, Quote, QuoteItem, QuoteStatus};

/// Quote pricing engine.
pub struct QuotePricingEngine;

impl QuotePricingEngine {
    /// Builds a new quote from a structured item list.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError` on empty items, non-positive quantities,
    /// negative prices, a negative delivery fee, or a missing/non-positive
    /// locked rate outside divisa mode. Nothing is persisted on error.
    pub fn build(input: BuildQuoteInput) -> Result<Quote, QuoteError> {
        let (items, total_primary, total_secondary, total_bs) = Self::price(&input)?;

        Ok(Quote {
            code: QuoteCode::generate(),
            date: input.date,
            items,
            total_primary,
            total_secondary,
            total_bs,
            delivery_fee: input.delivery_fee,
            pricing_mode: input.pricing_mode,
            hide_bs_on_documents: input.hide_bs_on_documents,
            status: QuoteStatus::Pending,
            customer_name: input.customer_name,
            customer_address: input.customer_address,
            locked_rate: input.locked_rate,
            externally_referenced: false,
        })
    }

    /// Rebuilds an existing quote from a complete new input.
    ///
    /// The whole item/total set is regenerated and overwritten atomically;
    /// the code, status, and external-reference flag survive the edit. On
    /// error the quote is left untouched.
    ///
    /// # Errors
    ///
    /// Same validation as [`build`](Self::build).
    pub fn rebuild(quote: &mut Quote, input: BuildQuoteInput) -> Result<(), QuoteError> {
        let (items, total_primary, total_secondary, total_bs) = Self::price(&input)?;

        quote.date = input.date;
        quote.items = items;
        quote.total_primary = total_primary;
        quote.total_secondary = total_secondary;
        quote.total_bs = total_bs;
        quote.delivery_fee = input.delivery_fee;
        quote.pricing_mode = input.pricing_mode;
        quote.hide_bs_on_documents = input.hide_bs_on_documents;
        quote.customer_name = input.customer_name;
        quote.customer_address = input.customer_address;
        quote.locked_rate = input.locked_rate;
        Ok(())
    }

    /// Infers the pricing mode of a quote that predates the explicit field.
    ///
    /// Legacy read-path fallback only; new writes always persist
    /// `pricing_mode` explicitly. Deterministic:
    /// - `total_bs == 0` => Divisa
    /// - `total_secondary` set, different from `total_primary`, and
    ///   `total_bs > 0` => Dual
    /// - otherwise => Bcv
    #[must_use]
    pub fn infer_pricing_mode(quote: &Quote) -> PricingMode {
        if quote.total_bs == Decimal::ZERO {
            return PricingMode::Divisa;
        }
        match quote.total_secondary {
            Some(secondary)
                if secondary != quote.total_primary && quote.total_bs > Decimal::ZERO =>
            {
                PricingMode::Dual
            }
            _ => PricingMode::Bcv,
        }
    }

    /// Validates the input and computes lines and totals.
    #[allow(clippy::type_complexity)]
    fn price(
        input: &BuildQuoteInput,
    ) -> Result<(Vec<QuoteItem>, Decimal, Option<Decimal>, Decimal), QuoteError> {
        if input.items.is_empty() {
            return Err(QuoteError::EmptyItems);
        }
        if input.delivery_fee < Decimal::ZERO {
            return Err(QuoteError::NegativeDeliveryFee);
        }
        let locked_rate = match (input.pricing_mode, input.locked_rate) {
            (PricingMode::Divisa, _) => None,
            (_, Some(rate)) if rate > Decimal::ZERO => Some(rate),
            (_, Some(_)) => return Err(QuoteError::NonPositiveRate),
            (_, None) => return Err(QuoteError::MissingRate),
        };

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            if item.name.trim().is_empty() {
                return Err(QuoteError::BlankItemName);
            }
            if item.quantity <= Decimal::ZERO {
                return Err(QuoteError::NonPositiveQuantity(item.name.clone()));
            }
            if item.unit_price_primary < Decimal::ZERO
                || item.unit_price_secondary.is_some_and(|p| p < Decimal::ZERO)
            {
                return Err(QuoteError::NegativePrice(item.name.clone()));
            }

            let line_primary = round2(item.unit_price_primary * item.quantity);
            let (unit_price_secondary, line_secondary) =
                if input.pricing_mode == PricingMode::Dual {
                    let unit_price =
                        item.unit_price_secondary.unwrap_or(item.unit_price_primary);
                    (Some(unit_price), Some(round2(unit_price * item.quantity)))
                } else {
                    (None, None)
                };

            items.push(QuoteItem {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                unit_price_primary: item.unit_price_primary,
                line_primary,
                unit_price_secondary,
                line_secondary,
            });
        }

        let total_primary =
            round2(items.iter().map(|i| i.line_primary).sum::<Decimal>()) + input.delivery_fee;
        let total_secondary = if input.pricing_mode == PricingMode::Dual {
            Some(
                round2(
                    items
                        .iter()
                        .filter_map(|i| i.line_secondary)
                        .sum::<Decimal>(),
                ) + input.delivery_fee,
            )
        } else {
            None
        };
        let total_bs = match locked_rate {
            Some(rate) => round2(total_primary * rate),
            None => Decimal::ZERO,
        };

        Ok((items, total_primary, total_secondary, total_bs))
    }
}
