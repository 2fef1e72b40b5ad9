//! Reference exchange rate source seam.
//!
//! The core never reads an ambient "current rate" global: callers inject a
//! [`RateSource`] and capture the returned value as `locked_rate` at
//! transaction/quote creation. Locked rates are never re-queried
//! retroactively.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fiado_shared::AppError;

/// Which reference rate to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Bolivars per US dollar.
    BcvUsd,
    /// Bolivars per euro.
    BcvEur,
}

/// A day's pair of reference rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Bolivars per US dollar.
    pub usd: Decimal,
    /// Bolivars per euro.
    pub eur: Decimal,
    /// The day these rates are effective.
    pub date: NaiveDate,
}

impl RateQuote {
    /// Returns the rate for one kind.
    #[must_use]
    pub fn for_kind(&self, kind: RateKind) -> Decimal {
        match kind {
            RateKind::BcvUsd => self.usd,
            RateKind::BcvEur => self.eur,
        }
    }
}

/// Errors from a rate source.
///
/// The core never retries; retry policy belongs to the rate collaborator.
#[derive(Debug, Error)]
pub enum RateError {
    /// The source could not be reached.
    #[error("Rate source unavailable: {0}")]
    Unavailable(String),

    /// The source responded with something unparseable.
    #[error("Malformed rate response: {0}")]
    Malformed(String),

    /// No rate recorded for the requested date.
    #[error("No reference rate found for {0}")]
    NotFound(NaiveDate),
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        match &err {
            RateError::NotFound(_) => Self::NotFound(err.to_string()),
            _ => Self::ExternalService(err.to_string()),
        }
    }
}

/// Supplier of current and historical reference exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Returns today's reference rate for the given kind.
    async fn current_rate(&self, kind: RateKind) -> Result<Decimal, RateError>;

    /// Returns the reference rates effective on a past date.
    async fn rate_on_date(&self, date: NaiveDate) -> Result<RateQuote, RateError>;
}

/// A fixed-rate source for tests and manual/offline operation.
#[derive(Debug, Clone, Copy)]
pub struct FixedRateSource {
    usd: Decimal,
    eur: Decimal,
}

impl FixedRateSource {
    /// Creates a source that always answers with the given rates.
    #[must_use]
    pub const fn new(usd: Decimal, eur: Decimal) -> Self {
        Self { usd, eur }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn current_rate(&self, kind: RateKind) -> Result<Decimal, RateError> {
        Ok(match kind {
            RateKind::BcvUsd => self.usd,
            RateKind::BcvEur => self.eur,
        })
    }

    async fn rate_on_date(&self, date: NaiveDate) -> Result<RateQuote, RateError> {
        Ok(RateQuote {
            usd: self.usd,
            eur: self.eur,
            date,
        })
    }
}
