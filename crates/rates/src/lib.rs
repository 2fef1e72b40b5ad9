//! HTTP-backed reference rate provider.
//!
//! Talks to a rate service exposing the day's BCV reference rates as JSON.
//! The base URL is injected, so tests run against a local mock server and
//! deployments point at whatever mirror is configured.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::error;

use fiado_core::rate::{RateError, RateKind, RateQuote, RateSource};

/// Wire shape of a rate response. Rates come as strings to avoid any float
/// step on the way in.
#[derive(Debug, Deserialize)]
struct RateResponse {
    usd: Decimal,
    eur: Decimal,
    date: NaiveDate,
}

impl From<RateResponse> for RateQuote {
    fn from(body: RateResponse) -> Self {
        Self {
            usd: body.usd,
            eur: body.eur,
            date: body.date,
        }
    }
}

/// A [`RateSource`] backed by an HTTP rate service.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRateSource {
    /// Creates a source against the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, path: &str) -> Result<RateQuote, RateError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // Surfaced by the caller as a missing-date error; the current
            // endpoint treats it as the service having no rate yet.
            return Err(RateError::Malformed(format!("{url} returned 404")));
        }
        if !status.is_success() {
            return Err(RateError::Unavailable(format!("{url} returned {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::Unavailable(e.to_string()))?;
        match serde_json::from_str::<RateResponse>(&text) {
            Ok(body) => Ok(body.into()),
            Err(e) => {
                error!(error = %e, response = %text, "unparseable rate response");
                Err(RateError::Malformed(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn current_rate(&self, kind: RateKind) -> Result<Decimal, RateError> {
        let quote = self.fetch("/rates/current").await?;
        Ok(quote.for_kind(kind))
    }

    async fn rate_on_date(&self, date: NaiveDate) -> Result<RateQuote, RateError> {
        match self.fetch(&format!("/rates/{date}")).await {
            Err(RateError::Malformed(msg)) if msg.ends_with("returned 404") => {
                Err(RateError::NotFound(date))
            }
            other => other,
        }
    }
}
