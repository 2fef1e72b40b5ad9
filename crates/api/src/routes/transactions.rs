//! Ledger transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use fiado_core::customer::{Customer, RateType};
use fiado_core::ledger::{
    CreateTransactionInput, CurrencyTrack, EditTransactionInput, Transaction, TxKind,
};
use fiado_core::rate::RateKind;
use fiado_shared::{AppError, CustomerId, QuoteCode, TransactionId, round2};

use crate::{ApiResult, AppState};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers/{id}/transactions", post(create_transaction))
        .route("/customers/{id}/transactions", get(list_transactions))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", put(edit_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
        .route("/transactions/{id}/settle", post(settle_transaction))
        .route("/transactions/{id}/unsettle", post(unsettle_transaction))
}

/// Request body for creating a transaction.
///
/// `locked_rate` and `amount_bs` are optional: when absent the rate is
/// locked from the rate source at creation time and the bolivar amount is
/// derived from it.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Purchase or payment.
    pub kind: TxKind,
    /// Calendar day of the transaction.
    pub date: NaiveDate,
    /// Operator-facing description.
    pub description: String,
    /// Amount in the track's primary currency.
    pub amount_primary: Decimal,
    /// Informational bolivar amount; derived from the locked rate if absent.
    pub amount_bs: Option<Decimal>,
    /// Cash-USD expression for a dual BCV-USD debt.
    pub amount_secondary: Option<Decimal>,
    /// Currency track.
    pub currency_track: CurrencyTrack,
    /// Linked quote, if any.
    pub quote_ref: Option<QuoteCode>,
    /// Payment method, if a payment.
    pub payment_method: Option<String>,
    /// Explicit rate override; normally left out so the current reference
    /// rate is captured.
    pub locked_rate: Option<Decimal>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Request body for settling a purchase.
#[derive(Debug, Default, Deserialize)]
pub struct SettleRequest {
    /// How the debt was settled.
    pub method: Option<String>,
    /// Settlement date; defaults to today.
    pub date: Option<NaiveDate>,
}

/// POST `/customers/{id}/transactions` - Record a transaction.
///
/// The reference rate is locked here, once, and never re-queried for this
/// transaction afterwards.
async fn create_transaction(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let customer = state.store.get_customer(id)?;

    let locked_rate = match payload.locked_rate {
        Some(rate) => Some(rate),
        None => lock_rate(&state, &customer, payload.currency_track).await?,
    };
    let amount_bs = match (payload.amount_bs, locked_rate) {
        (Some(bs), _) => bs,
        (None, Some(rate)) if payload.currency_track != CurrencyTrack::Divisas => {
            round2(payload.amount_primary * rate)
        }
        (None, _) => Decimal::ZERO,
    };

    let tx = state.store.add_transaction(CreateTransactionInput {
        customer_id: id,
        kind: payload.kind,
        date: payload.date,
        description: payload.description,
        amount_primary: payload.amount_primary,
        amount_bs,
        amount_secondary: payload.amount_secondary,
        currency_track: payload.currency_track,
        quote_ref: payload.quote_ref,
        payment_method: payload.payment_method,
        locked_rate,
        notes: payload.notes,
    })?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// GET `/customers/{id}/transactions` - List a customer's ledger.
async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.store.transactions(id)?))
}

/// GET `/transactions/{id}` - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<Json<Transaction>> {
    Ok(Json(state.store.get_transaction(id)?))
}

/// PUT `/transactions/{id}` - Replace a transaction's mutable fields.
async fn edit_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
    Json(payload): Json<EditTransactionInput>,
) -> ApiResult<Json<Transaction>> {
    let tx = state.store.edit_transaction(id, payload)?;
    info!(tx_id = %id, "transaction edited");
    Ok(Json(tx))
}

/// DELETE `/transactions/{id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<StatusCode> {
    state.store.delete_transaction(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/transactions/{id}/settle` - Settle a purchase.
async fn settle_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
    Json(payload): Json<SettleRequest>,
) -> ApiResult<Json<Transaction>> {
    let date = payload
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let tx = state.store.settle_transaction(id, payload.method, date)?;
    info!(tx_id = %id, "transaction settled");
    Ok(Json(tx))
}

/// POST `/transactions/{id}/unsettle` - Revert a settlement.
async fn unsettle_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> ApiResult<Json<Transaction>> {
    let tx = state.store.unsettle_transaction(id)?;
    info!(tx_id = %id, "transaction unsettled");
    Ok(Json(tx))
}

/// Locks the reference rate for a new transaction.
///
/// Divisas transactions carry no rate. Manual-rate customers use their
/// agreed rate; everyone else gets the live rate for the track.
async fn lock_rate(
    state: &AppState,
    customer: &Customer,
    track: CurrencyTrack,
) -> Result<Option<Decimal>, AppError> {
    let kind = match track {
        CurrencyTrack::Divisas => return Ok(None),
        CurrencyTrack::BcvUsd => RateKind::BcvUsd,
        CurrencyTrack::BcvEur => RateKind::BcvEur,
    };
    if customer.rate_type == RateType::Manual {
        return Ok(customer.custom_rate);
    }
    Ok(Some(state.rates.current_rate(kind).await?))
}
