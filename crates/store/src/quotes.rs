//! Quote persistence.
//!
//! Quotes are keyed by their short opaque code. Edits regenerate the whole
//! item/total set via the pricing engine and the stored quote is swapped
//! atomically.

use dashmap::mapref::entry::Entry;
use tracing::info;

use fiado_core::quote::{BuildQuoteInput, Quote, QuoteError, QuotePricingEngine, QuoteStatus};
use fiado_shared::{AppResult, QuoteCode};

use crate::Store;

impl Store {
    /// Builds and persists a new quote.
    ///
    /// The generated code is claimed through the map's entry API, so the
    /// collision check and the insert are one step even under concurrent
    /// creates; on the (unlikely) collision a fresh code is generated.
    pub fn create_quote(&self, input: BuildQuoteInput) -> AppResult<Quote> {
        let mut quote = QuotePricingEngine::build(input)?;
        loop {
            match self.quotes.entry(quote.code.as_str().to_string()) {
                Entry::Occupied(_) => quote.code = QuoteCode::generate(),
                Entry::Vacant(slot) => {
                    slot.insert(quote.clone());
                    break;
                }
            }
        }
        info!(code = %quote.code, mode = ?quote.pricing_mode, "quote created");
        Ok(quote)
    }

    /// Returns a quote by code.
    pub fn get_quote(&self, code: &QuoteCode) -> AppResult<Quote> {
        self.quotes
            .get(code.as_str())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| QuoteError::NotFound(code.clone()).into())
    }

    /// Regenerates a quote from a complete new input and overwrites it.
    pub fn edit_quote(&self, code: &QuoteCode, input: BuildQuoteInput) -> AppResult<Quote> {
        let mut entry = self
            .quotes
            .get_mut(code.as_str())
            .ok_or_else(|| fiado_shared::AppError::from(QuoteError::NotFound(code.clone())))?;
        QuotePricingEngine::rebuild(entry.value_mut(), input)?;
        Ok(entry.value().clone())
    }

    /// Flags a quote as externally referenced (a document for it has been
    /// issued). Transactions linked to it can no longer be deleted.
    pub fn mark_quote_externally_referenced(&self, code: &QuoteCode) -> AppResult<Quote> {
        let mut entry = self
            .quotes
            .get_mut(code.as_str())
            .ok_or_else(|| fiado_shared::AppError::from(QuoteError::NotFound(code.clone())))?;
        entry.value_mut().externally_referenced = true;
        Ok(entry.value().clone())
    }

    /// Marks a quote settled.
    pub fn settle_quote(&self, code: &QuoteCode) -> AppResult<Quote> {
        let mut entry = self
            .quotes
            .get_mut(code.as_str())
            .ok_or_else(|| fiado_shared::AppError::from(QuoteError::NotFound(code.clone())))?;
        entry.value_mut().status = QuoteStatus::Settled;
        Ok(entry.value().clone())
    }
}
