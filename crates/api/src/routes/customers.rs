//! Customer management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use fiado_core::customer::{CreateCustomerInput, Customer, RateType};
use fiado_core::ledger::CustomerBalances;
use fiado_core::projection::BalanceView;
use fiado_shared::{CustomerId, round2};
use fiado_store::UpdateCustomerInput;

use crate::{ApiResult, AppState};

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer))
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer))
        .route("/customers/{id}", patch(update_customer))
}

/// Query parameters for balance reads.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Currency view the balances are projected into.
    #[serde(default)]
    pub view: BalanceView,
}

/// A customer plus their projected balances.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// The customer record.
    #[serde(flatten)]
    pub customer: Customer,
    /// Balances under the requested view.
    pub balances_view: CustomerBalances,
    /// Informational bolivar equivalent of the customer's main balance at
    /// today's rate. The authoritative figures are the balances themselves.
    pub bs_today: Option<Decimal>,
}

/// POST `/customers` - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerInput>,
) -> ApiResult<impl IntoResponse> {
    let customer = state.store.create_customer(payload)?;
    info!(customer_id = %customer.id, name = %customer.name, "customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET `/customers` - List all customers, sorted by name.
async fn list_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.store.list_customers())
}

/// GET `/customers/{id}` - Get a customer with balances under a view.
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<CustomerResponse>> {
    let customer = state.store.get_customer(id)?;
    let balances_view = state.store.balances(id, query.view)?;
    let bs_today = bs_today(&state, &customer).await;
    Ok(Json(CustomerResponse {
        customer,
        balances_view,
        bs_today,
    }))
}

/// PATCH `/customers/{id}` - Partially update a customer.
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<UpdateCustomerInput>,
) -> ApiResult<Json<Customer>> {
    let customer = state.store.update_customer(id, payload)?;
    info!(customer_id = %id, "customer updated");
    Ok(Json(customer))
}

/// Today's bolivar equivalent of the customer's rate-bearing balance.
///
/// Informational only: a rate source failure degrades to `None` rather than
/// failing the read.
async fn bs_today(state: &AppState, customer: &Customer) -> Option<Decimal> {
    let balance = match customer.rate_type {
        RateType::BcvEur => customer.balances.euro,
        RateType::BcvUsd | RateType::Manual => customer.balances.bcv,
    };
    let rate = match customer.rate_kind() {
        None => customer.custom_rate?,
        Some(kind) => state.rates.current_rate(kind).await.ok()?,
    };
    Some(round2(balance * rate))
}
