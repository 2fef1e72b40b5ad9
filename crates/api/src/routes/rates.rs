//! Reference exchange rate routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fiado_core::rate::RateKind;

use crate::{ApiResult, AppState};

/// Creates the rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rates/current", get(current_rate))
}

/// Query parameters for the current rate lookup.
#[derive(Debug, Deserialize)]
pub struct CurrentRateQuery {
    /// Which reference rate; defaults to the BCV USD rate.
    pub kind: Option<RateKind>,
}

/// Response for a rate lookup.
#[derive(Debug, Serialize)]
pub struct CurrentRateResponse {
    /// The rate kind that was looked up.
    pub kind: RateKind,
    /// Bolivars per unit of the reference currency.
    pub rate: Decimal,
}

/// GET `/rates/current` - Today's reference rate.
async fn current_rate(
    State(state): State<AppState>,
    Query(query): Query<CurrentRateQuery>,
) -> ApiResult<Json<CurrentRateResponse>> {
    let kind = query.kind.unwrap_or(RateKind::BcvUsd);
    let rate = state.rates.current_rate(kind).await?;
    Ok(Json(CurrentRateResponse { kind, rate }))
}
