//! Share token routes: issue, revoke, and the public read-only snapshot.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Serialize;

use fiado_core::ledger::{CustomerBalances, Transaction};
use fiado_shared::CustomerId;

use crate::routes::customers::ViewQuery;
use crate::{ApiResult, AppState};

/// Creates the share token routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers/{id}/share-token", post(issue_token))
        .route("/customers/{id}/share-token", delete(revoke_token))
        .route("/share/{token}", get(shared_snapshot))
}

/// Response for a freshly issued token.
#[derive(Debug, Serialize)]
pub struct ShareTokenResponse {
    /// The opaque token. Reissuing invalidates any previous one.
    pub token: String,
}

/// The read-only snapshot a share token grants access to.
///
/// Deliberately excludes the customer's phone, notes, and rate setup: the
/// link is meant to be forwarded to the customer themselves.
#[derive(Debug, Serialize)]
pub struct SharedSnapshot {
    /// Customer name.
    pub customer_name: String,
    /// Outstanding balances under the requested view.
    pub balances: CustomerBalances,
    /// Full transaction log in insertion order.
    pub transactions: Vec<Transaction>,
}

/// POST `/customers/{id}/share-token` - Issue (or reissue) a share token.
async fn issue_token(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<impl IntoResponse> {
    let token = state.store.issue_share_token(id)?;
    Ok((StatusCode::CREATED, Json(ShareTokenResponse { token })))
}

/// DELETE `/customers/{id}/share-token` - Revoke the share token.
async fn revoke_token(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> ApiResult<StatusCode> {
    state.store.revoke_share_token(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/share/{token}` - Read-only balance/ledger snapshot.
///
/// Revoked, unknown, and malformed tokens all produce the same NotFound.
async fn shared_snapshot(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<SharedSnapshot>> {
    let customer_id = state.store.resolve_share_token(&token)?;
    let customer = state.store.get_customer(customer_id)?;
    let balances = state.store.balances(customer_id, query.view)?;
    let transactions = state.store.transactions(customer_id)?;
    Ok(Json(SharedSnapshot {
        customer_name: customer.name,
        balances,
        transactions,
    }))
}
