//! Quote (presupuesto) routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::info;

use fiado_core::quote::{BuildQuoteInput, Quote};
use fiado_shared::{AppError, QuoteCode};

use crate::{ApiResult, AppState};

/// Creates the quote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", post(create_quote))
        .route("/quotes/{code}", get(get_quote))
        .route("/quotes/{code}", put(edit_quote))
        .route("/quotes/{code}/issued", post(mark_issued))
        .route("/quotes/{code}/settle", post(settle_quote))
}

/// POST `/quotes` - Build and store a quote.
async fn create_quote(
    State(state): State<AppState>,
    Json(payload): Json<BuildQuoteInput>,
) -> ApiResult<impl IntoResponse> {
    let quote = state.store.create_quote(payload)?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// GET `/quotes/{code}` - Get a quote.
async fn get_quote(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Quote>> {
    let code = parse_code(&code)?;
    Ok(Json(state.store.get_quote(&code)?))
}

/// PUT `/quotes/{code}` - Regenerate a quote from a complete new input.
async fn edit_quote(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<BuildQuoteInput>,
) -> ApiResult<Json<Quote>> {
    let code = parse_code(&code)?;
    let quote = state.store.edit_quote(&code, payload)?;
    info!(code = %code, "quote edited");
    Ok(Json(quote))
}

/// POST `/quotes/{code}/issued` - Mark a quote as externally referenced.
///
/// Once a document for the quote exists outside the system, ledger
/// transactions linked to it can no longer be deleted.
async fn mark_issued(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Quote>> {
    let code = parse_code(&code)?;
    let quote = state.store.mark_quote_externally_referenced(&code)?;
    info!(code = %code, "quote marked issued");
    Ok(Json(quote))
}

/// POST `/quotes/{code}/settle` - Mark a quote settled.
async fn settle_quote(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Quote>> {
    let code = parse_code(&code)?;
    let quote = state.store.settle_quote(&code)?;
    info!(code = %code, "quote settled");
    Ok(Json(quote))
}

/// Parses a path segment into a quote code.
///
/// Malformed codes answer like unknown ones, so the error surface does not
/// distinguish "bad code" from "no such quote".
fn parse_code(raw: &str) -> Result<QuoteCode, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Quote {raw}")))
}
